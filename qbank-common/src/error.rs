//! Common error types for QBank

use thiserror::Error;

/// Common result type for QBank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the QBank service
#[derive(Error, Debug)]
pub enum Error {
    /// Remote feed unreachable or returned a non-2xx status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Feed body is not a valid delimited table
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local base/visits file missing or malformed (recoverable)
    #[error("Local read error: {0}")]
    LocalRead(String),

    /// Bad credentials or token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
