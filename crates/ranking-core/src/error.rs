// Error types for the API client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never got an answer (connect failure, timeout, reset).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A status line arrived but the body could not be read.
    #[error("failed to read response from {path} (status {status}): {source}")]
    Body {
        path: String,
        status: u16,
        source: reqwest::Error,
    },

    /// The backend answered 2xx but the body was not the expected JSON.
    #[error("unexpected response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },
}

impl ApiError {
    /// True when the backend could not be reached at all, as opposed to
    /// answering with an error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } | ApiError::Body { status, .. } => Some(*status),
            _ => None,
        }
    }
}
