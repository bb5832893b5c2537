//! Error types for organization and membership operations

use cms_store::StoreError;
use thiserror::Error;

/// Organization error types.
///
/// These errors cover validation, lookups, uniqueness and the ownership
/// invariant. They are surfaced unchanged to the caller; nothing here is
/// retried.
#[derive(Debug, Error)]
pub enum OrgError {
    /// A caller-supplied value violates a field rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced organization, user, membership or space does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The operation would duplicate a unique membership
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The single-owner post-condition does not hold
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    /// Record store failure
    #[error("Store error: {0}")]
    Store(StoreError),
}

/// Result type for organization operations.
pub type OrgResult<T> = Result<T, OrgError>;

impl From<StoreError> for OrgError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { kind, fields } => {
                OrgError::Conflict(format!("{} already exists for ({})", kind, fields))
            }
            other => OrgError::Store(other),
        }
    }
}

impl OrgError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        OrgError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this error should be logged at error level.
    ///
    /// Validation, lookup and conflict errors are caller mistakes.
    pub fn is_server_error(&self) -> bool {
        matches!(self, OrgError::InvariantViolation(_) | OrgError::Store(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            OrgError::Validation(_) => "VALIDATION_ERROR",
            OrgError::NotFound { .. } => "NOT_FOUND",
            OrgError::Conflict(_) => "CONFLICT",
            OrgError::InvariantViolation(_) => "INVARIANT_VIOLATION",
            OrgError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let err: OrgError = StoreError::UniqueViolation {
            kind: "membership",
            fields: "organization_id, user_id".to_string(),
        }
        .into();
        assert!(matches!(err, OrgError::Conflict(_)));
        assert_eq!(err.error_code(), "CONFLICT");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_backend_error_is_server_error() {
        let err: OrgError = StoreError::Backend("down".to_string()).into();
        assert!(matches!(err, OrgError::Store(_)));
        assert!(err.is_server_error());
    }

    #[test]
    fn test_not_found_display() {
        let err = OrgError::not_found("Membership", "abc");
        assert_eq!(err.to_string(), "Membership not found: abc");
    }
}
