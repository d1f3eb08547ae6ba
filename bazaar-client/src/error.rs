//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server replied with a payload we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session cookie missing or expired (HTTP 401).
    ///
    /// Invalidates the whole editing session, not just one call.
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (HTTP 403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server-side validation rejected the payload (HTTP 400/422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server-side failure (HTTP 5xx)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the error invalidates the session rather than one call
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
