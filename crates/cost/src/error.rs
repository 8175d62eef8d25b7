//! Error types for cost API operations.

use thiserror::Error;

/// Errors that can occur while talking to the cost-reporting API.
#[derive(Error, Debug)]
pub enum CostApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The auth endpoint handed back the anonymous marker.
    #[error("Your token has expired. Please redeploy your cost app.")]
    TokenExpired,

    /// Token body could not be used as a credential.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response parsed but lacked an expected field.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Invalid time window selector.
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

impl CostApiError {
    /// HTTP status code carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = CostApiError> = std::result::Result<T, E>;
