//! Organization service configuration.
//!
//! Configuration is loaded from environment variables with defaults that
//! match the storage limits of the organization tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plan::Plan;

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

/// Configuration for the membership manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Maximum length of organization, user and space names, in characters.
    pub max_name_length: usize,

    /// Plan assigned to newly created organizations.
    pub default_plan: Plan,
}

impl Default for OrgConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            default_plan: Plan::Free,
        }
    }
}

impl OrgConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CMS_ORG_MAX_NAME_LENGTH`: Maximum name length (default: 100)
    /// - `CMS_ORG_DEFAULT_PLAN`: Plan for new organizations (default: free)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_name_length: std::env::var("CMS_ORG_MAX_NAME_LENGTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.max_name_length),
            default_plan: std::env::var("CMS_ORG_DEFAULT_PLAN")
                .ok()
                .and_then(|s| Plan::parse(&s))
                .unwrap_or(default.default_plan),
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_name_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CMS_ORG_MAX_NAME_LENGTH".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
