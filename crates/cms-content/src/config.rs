//! Content service configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for the publication tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Maximum title length, in characters.
    pub max_title_length: usize,

    /// Reject content whose value is null or an empty object.
    pub require_value: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_title_length: 100,
            require_value: true,
        }
    }
}

impl ContentConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CMS_CONTENT_MAX_TITLE_LENGTH`: Maximum title length (default: 100)
    /// - `CMS_CONTENT_REQUIRE_VALUE`: Require a non-empty value (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_title_length: std::env::var("CMS_CONTENT_MAX_TITLE_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_title_length),
            require_value: std::env::var("CMS_CONTENT_REQUIRE_VALUE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.require_value),
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_title_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CMS_CONTENT_MAX_TITLE_LENGTH".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
