//! Configuration error types.

/// Result type for configuration operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required field is missing or a recognized field has the wrong type.
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(err.to_string())
    }
}
