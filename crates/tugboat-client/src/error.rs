//! Error types for the tugboat client

use thiserror::Error;

/// Errors that can occur when using the tugboat client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// API returned an error, either as an HTTP status or as `"status": "ERROR"`
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },
}

impl ClientError {
    /// Wrap a transport error, separating out timeouts
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err)
        }
    }

    /// Whether the provider rejected the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401 | 403, .. })
            || matches!(self, ClientError::Api { message, .. } if message.contains("Access Denied"))
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
