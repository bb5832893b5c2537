//! Error types for record-store operations

use thiserror::Error;

/// Record-store error types.
///
/// These errors are raised by store backends. Domain crates wrap them in
/// their own error enums and translate the ones that carry domain meaning
/// (for example a unique-key violation becomes a conflict).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record addressed by id does not exist
    #[error("{kind} record not found: {id}")]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Record id
        id: String,
    },

    /// A create or update would duplicate a declared unique key
    #[error("Unique key violation on {kind} ({fields})")]
    UniqueViolation {
        /// Record kind
        kind: &'static str,
        /// Comma-separated field names of the violated key
        fields: String,
    },

    /// A record could not be converted to or from its stored form
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Backend failure (connection, lock, I/O)
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for record-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl StoreError {
    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::UniqueViolation { .. } => "UNIQUE_VIOLATION",
            StoreError::Serialization(_) => "SERIALIZATION_ERROR",
            StoreError::Backend(_) => "BACKEND_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::UniqueViolation {
            kind: "membership",
            fields: "organization_id, user_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unique key violation on membership (organization_id, user_id)"
        );
        assert_eq!(err.error_code(), "UNIQUE_VIOLATION");
    }

    #[test]
    fn test_from_serde_error() {
        let bad = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err: StoreError = bad.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
