use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Bluesky API error: {0}")]
    BlueskyApi(#[from] BlueskyApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("List not found: {name}")]
    ListNotFound { name: String },

    #[error("Pagination of {endpoint} exceeded {max_pages} pages")]
    PaginationLimit { endpoint: String, max_pages: usize },

    #[error("Failed to {stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Tags the error with the pipeline stage it surfaced from.
    pub fn in_stage(self, stage: Stage) -> Self {
        CoreError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through stage wrappers.
    pub fn root(&self) -> &CoreError {
        match self {
            CoreError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Steps of a recommendation run, used to name the failing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Authenticate,
    ResolveHandle { handle: String },
    FetchLists { actor: String },
    SelectList { name: String },
    FetchListMembers { list: String },
    FetchMemberFollows { member: String },
    FetchUserFollows { actor: String },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Authenticate => write!(f, "authenticate"),
            Stage::ResolveHandle { handle } => write!(f, "resolve handle {}", handle),
            Stage::FetchLists { actor } => write!(f, "retrieve lists of {}", actor),
            Stage::SelectList { name } => write!(f, "select list {}", name),
            Stage::FetchListMembers { list } => write!(f, "retrieve members of list {}", list),
            Stage::FetchMemberFollows { member } => {
                write!(f, "retrieve follows of list member {}", member)
            }
            Stage::FetchUserFollows { actor } => write!(f, "retrieve follows of {}", actor),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum BlueskyApiError {
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Invalid or expired access token")]
    InvalidToken,

    #[error("Forbidden access to resource: {resource}")]
    Forbidden { resource: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request to {endpoint}: {message}")]
    BadRequest { endpoint: String, message: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status {status_code} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status_code: u16 },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
