/// Core error taxonomy
///
/// Every service operation returns `Result<T, CoreError>`. The taxonomy
/// keeps policy denials machine-distinguishable (admin-only vs. not
/// authorized vs. access denied) so the boundary layer can map each to
/// the correct externally visible status without string matching.
///
/// Store failures are wrapped as `CoreError::Store` and must be surfaced
/// as a generic server error; the underlying detail is for logs only.

use crate::auth::policy::Deny;
use crate::store::StoreError;

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Unified error type for the domain core
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Missing or invalid field, user-correctable
    #[error("{0}")]
    Validation(String),

    /// Referenced entity is absent
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate state, e.g. adding a member twice
    #[error("{0}")]
    Conflict(String),

    /// Policy denial with a machine-distinguishable reason
    #[error(transparent)]
    Denied(#[from] Deny),

    /// Underlying persistence failure
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Shorthand for a validation failure
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::validation("title is required");
        assert_eq!(err.to_string(), "title is required");

        let err = CoreError::NotFound("project");
        assert_eq!(err.to_string(), "project not found");

        let err = CoreError::Denied(Deny::AdminOnly);
        assert_eq!(err.to_string(), "Admin only");
    }
}
