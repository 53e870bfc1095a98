//! Client error types

use crate::cache::CacheError;
use shared::ErrorCode;
use std::time::Duration;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote call exceeded the fixed timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid response format or non-2xx status
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Remote answered `success: false`
    #[error("Rejected by remote: {0}")]
    Rejected(String),

    /// No remote endpoint configured
    #[error("No remote endpoint configured")]
    NotConfigured,

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local cache error
    #[error("Local cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Rejected(_) => ErrorCode::RemoteRejected,
            ClientError::Cache(_) => ErrorCode::LocalWriteFailed,
            _ => ErrorCode::RemoteUnavailable,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
