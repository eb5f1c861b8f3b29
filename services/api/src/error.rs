//! Custom error types for the API client

use common::error::StorageError;
use reqwest::StatusCode;
use thiserror::Error;

/// Message used when the server gives no usable error message
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Custom error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Input rejected locally, before any network call
    #[error("{0}")]
    Validation(String),

    /// Transport failure (DNS, connection refused, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response carrying the server-supplied message
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Success response whose body is not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication flow failed; the cause is logged, not carried
    #[error("{0}")]
    Auth(String),

    /// Session storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// Whether the server rejected the credentials of this call
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Api { status, message } => {
                *status == StatusCode::UNAUTHORIZED
                    || message.to_lowercase().contains("unauthorized")
            }
            _ => false,
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Type alias for client results
pub type ClientResult<T> = Result<T, ClientError>;
