//! Error types for the minera platform.

use thiserror::Error;

/// Common error type for minera operations.
#[derive(Error, Debug)]
pub enum MineraError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from the storage backend.
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unique constraint violation (e.g. a concurrent insert won the race).
    #[error("{0} already exists")]
    Duplicate(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for MineraError {
    fn from(e: sqlx::Error) -> Self {
        MineraError::Database(e.to_string())
    }
}

/// Result type alias for minera operations.
pub type Result<T> = std::result::Result<T, MineraError>;
