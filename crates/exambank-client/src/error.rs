//! Platform API error types.

use thiserror::Error;

/// Errors that can occur when talking to the platform API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with an error status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns `true` for 4xx responses, which resending will not fix.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if (400..500).contains(status))
    }
}
