//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised by the durable stores.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Value for '{key}' is {size} bytes, limit is {limit}")]
    TooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("Stored value for '{0}' is not valid UTF-8")]
    InvalidEncoding(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error returned by library and CLI operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Document error: {0}")]
    DocumentError(String),

    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Input error: {0}")]
    InputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<dialoguer::Error> for ApiError {
    fn from(err: dialoguer::Error) -> Self {
        ApiError::InputError(err.to_string())
    }
}
