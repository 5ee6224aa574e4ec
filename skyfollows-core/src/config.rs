//! Runtime configuration.
//!
//! Every field has a default, so an empty or absent config file is valid.
//! Command-line flags are applied on top by the binary.

use crate::error::ConfigError;
use crate::pagination::PaginationOptions;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

pub const PUBLIC_API_BASE: &str = "https://public.api.bsky.app/xrpc/";
pub const AUTH_API_BASE: &str = "https://bsky.social/xrpc/";
pub const DEFAULT_ACCOUNT: &str = "bsky.app";
pub const DEFAULT_MIN_COUNT: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// XRPC base for unauthenticated reads.
    pub api_base_url: String,
    /// XRPC base of the PDS used when a session is created.
    pub auth_base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Entries followed this many times or fewer are dropped.
    pub min_count: u32,
    /// Platform accounts never recommended (exact handle match).
    pub default_accounts: Vec<String>,
    pub max_pages: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: PUBLIC_API_BASE.to_string(),
            auth_base_url: AUTH_API_BASE.to_string(),
            user_agent: format!("skyfollows/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            min_count: DEFAULT_MIN_COUNT,
            default_accounts: vec![DEFAULT_ACCOUNT.to_string()],
            max_pages: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api_base_url", &self.api_base_url),
            ("auth_base_url", &self.auth_base_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
            if !value.ends_with('/') {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("{} must end with '/'", field),
                });
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }

        if self.max_pages == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_pages".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    pub fn pagination(&self) -> PaginationOptions {
        PaginationOptions {
            max_pages: self.max_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.min_count, 1);
        assert_eq!(config.default_accounts, vec!["bsky.app".to_string()]);
        assert_eq!(config.max_pages, None);
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            min_count = 3
            max_pages = 50
            default_accounts = ["bsky.app", "support.bsky.team"]
            "#,
        )
        .unwrap();

        assert_eq!(config.min_count, 3);
        assert_eq!(config.max_pages, Some(50));
        assert_eq!(config.default_accounts.len(), 2);
        assert_eq!(config.api_base_url, PUBLIC_API_BASE);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = AppConfig::from_toml_str(r#"api_base_url = "not a url""#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "api_base_url"
        ));

        let result = AppConfig::from_toml_str(r#"api_base_url = "https://example.com/xrpc""#);
        assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = AppConfig::from_toml_str("timeout_secs = 0");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let result = AppConfig::from_toml_str("min_cuont = 2");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }
}
