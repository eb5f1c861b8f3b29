//! Custom error types for the common library
//!
//! This module defines the errors raised by the key-value storage backends
//! and the configuration loader.

use thiserror::Error;

/// Custom error type for key-value storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error occurred while reading or writing the backing file
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid key-value document
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Configuration error
#[derive(Error, Debug)]
#[error("Configuration error: {0}")]
pub struct ConfigError(#[from] pub config::ConfigError);
