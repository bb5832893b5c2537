//! Error types for content and publication operations

use cms_store::StoreError;
use thiserror::Error;

/// Content error types.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A caller-supplied value violates a field rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced content entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Record store failure
    #[error("Store error: {0}")]
    Store(StoreError),
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => ContentError::NotFound { entity: kind, id },
            other => ContentError::Store(other),
        }
    }
}

impl ContentError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ContentError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ContentError::Store(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ContentError::Validation(_) => "VALIDATION_ERROR",
            ContentError::NotFound { .. } => "NOT_FOUND",
            ContentError::Store(_) => "STORE_ERROR",
        }
    }
}
