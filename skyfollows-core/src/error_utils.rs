use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self.root() {
            CoreError::BlueskyApi(e) => {
                error!("Bluesky API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            CoreError::Network(e) => {
                error!("Network error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Stage { stage, source } => {
                format!("Failed to {}. {}", stage, source.user_friendly_message())
            }
            CoreError::BlueskyApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
            CoreError::ListNotFound { name } => format!(
                "List '{}' not found. Run without --list to see the available lists.",
                name
            ),
            CoreError::PaginationLimit {
                endpoint,
                max_pages,
            } => format!(
                "{} returned more than {} pages. Raise max_pages in the configuration.",
                endpoint, max_pages
            ),
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Stage { source, .. } => source.error_code(),
            CoreError::BlueskyApi(_) => "BLUESKY_API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::ListNotFound { .. } => "LIST_NOT_FOUND".to_string(),
            CoreError::PaginationLimit { .. } => "PAGINATION_LIMIT".to_string(),
        }
    }
}

impl ErrorExt for BlueskyApiError {
    fn log_error(&self) -> &Self {
        error!("BlueskyApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("BlueskyApiError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            BlueskyApiError::AuthenticationFailed { .. } => {
                "Bluesky authentication failed. Please check your handle and app password."
                    .to_string()
            }
            BlueskyApiError::InvalidToken => {
                "Bluesky access token is invalid or expired. Please authenticate again."
                    .to_string()
            }
            BlueskyApiError::Forbidden { resource } => format!(
                "Access denied to {}. The account may be private or blocked.",
                resource
            ),
            BlueskyApiError::NotFound { resource } => {
                format!("'{}' was not found on Bluesky.", resource)
            }
            BlueskyApiError::BadRequest { message, .. } => {
                format!("Bluesky rejected the request: {}", message)
            }
            BlueskyApiError::InvalidResponse { .. } => {
                "Bluesky returned a response that could not be understood.".to_string()
            }
            _ => "Bluesky API error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            BlueskyApiError::AuthenticationFailed { .. } => "BSKY_AUTH_FAILED".to_string(),
            BlueskyApiError::InvalidToken => "BSKY_INVALID_TOKEN".to_string(),
            BlueskyApiError::Forbidden { .. } => "BSKY_FORBIDDEN".to_string(),
            BlueskyApiError::NotFound { .. } => "BSKY_NOT_FOUND".to_string(),
            BlueskyApiError::BadRequest { .. } => "BSKY_BAD_REQUEST".to_string(),
            BlueskyApiError::ServerError { .. } => "BSKY_SERVER_ERROR".to_string(),
            BlueskyApiError::UnexpectedStatus { .. } => "BSKY_UNEXPECTED_STATUS".to_string(),
            BlueskyApiError::InvalidResponse { .. } => "BSKY_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn reports_errors(&self) -> bool {
        self.report_errors
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
