//! Typed API errors.
//!
//! Every failed call ends up as one [`ApiError`]. `400`, `401` and `403` are
//! the authentication/authorization class ([`ApiError::is_auth_failure`]);
//! the UI treats them identically and only varies the message. A request that
//! never got a response is a [`ApiError::Transport`] error and is always
//! surfaced to the caller.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Shape of the `{ "error": "..." }` bodies the server sends on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// Classify a non-success HTTP status. The message is the server's `error`
    /// field when the body carries one, the raw body otherwise.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());
        match status {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            _ => Self::Status { status, message },
        }
    }

    /// The HTTP status behind this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether this is a 400/401/403 authentication or authorization failure.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::BadRequest(_) | Self::Unauthorized(_) | Self::Forbidden(_) => true,
            Self::Status { .. } | Self::Transport(_) | Self::Decode(_) => false,
        }
    }
}
