//! Errors crossing the persistence boundary

use thiserror::Error;

/// Failure of one backend request. Payloads are strings so responses stay `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Server unreachable or connection dropped
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Body did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// Server answered `success: false`
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Short text for the notice area
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the chart server.".to_string(),
            Self::Status { message, .. } | Self::Rejected(message) => message.clone(),
            Self::Decode(_) => "The chart server sent an unexpected response.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
