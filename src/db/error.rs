//! Error types for repository operations.

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// Nothing here is fatal to the process: failures are local to one record or
/// one call and reported upward as typed results. The filter and aggregation
/// engines never use these for control flow.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A persisted record is malformed (missing or invalid required field).
    /// Bulk loads skip the record and log it; the batch continues.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Input rejected before reaching the core (empty title, empty schedule).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_kind_and_message() {
        let err = RepositoryError::decoding("tracker 42 has empty title");
        assert_eq!(err.to_string(), "Decoding error: tracker 42 has empty title");

        let err = RepositoryError::not_found("no such category");
        assert_eq!(err.to_string(), "Not found: no such category");
    }
}
