// Engine configuration, fixed for the lifetime of a browsing session

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Page size must be positive, got {0}")]
    InvalidPageSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    // Listings shown per page
    pub page_size: usize,
    // Fail the whole catalog load on the first malformed entry instead of quarantining it
    pub strict_loading: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            strict_loading: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.page_size, 9);
        assert!(!config.strict_loading);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "page_size": 5 }"#).unwrap();
        assert_eq!(config.page_size, 5);
        assert!(!config.strict_loading);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "page_size": 0 }"#);
        assert!(matches!(result, Err(ConfigError::InvalidPageSize(0))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = EngineConfig::from_json_str("{ page_size: }");
        assert!(matches!(result, Err(ConfigError::JsonParse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::from_path("samples/does_not_exist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
