//! Error types for the platform client.

use thiserror::Error;

/// Errors that can occur when talking to the hosted platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Bearer token rejected by the platform
    #[error("Unauthorized - token rejected by platform")]
    Unauthorized,

    /// No row matched the query
    #[error("Row not found")]
    NotFound,

    /// A uniqueness constraint rejected the write
    ///
    /// The like path treats this as success: inserting an already-present
    /// `(entity, user)` pair means the intent already holds.
    #[error("Unique constraint violation: {message}")]
    UniqueViolation {
        /// Constraint message from the store
        message: String,
    },

    /// Platform returned an error status
    #[error("Platform error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the platform
        message: String,
    },
}

impl PlatformError {
    /// Whether this error is a uniqueness violation on insert.
    #[must_use]
    pub const fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_detected() {
        let err = PlatformError::UniqueViolation {
            message: "duplicate key value violates unique constraint".to_string(),
        };
        assert!(err.is_unique_violation());
        assert!(!PlatformError::Unauthorized.is_unique_violation());
    }
}
