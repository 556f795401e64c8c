//! Error types for lifelog-core

use thiserror::Error;

/// Main error type for the lifelog-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller supplied a parameter outside its allowed set (e.g. an unknown report period)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A stored record could not be decoded
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for lifelog-core
pub type Result<T> = std::result::Result<T, Error>;
