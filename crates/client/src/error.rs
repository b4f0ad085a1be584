use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of a single backend round trip.
///
/// Status-based variants carry the backend's human-readable message when the
/// error body had one.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unauthorized")]
    Unauthorized(Option<String>),
    #[error("forbidden")]
    Forbidden(Option<String>),
    #[error("not found")]
    NotFound(Option<String>),
    #[error("conflict")]
    Conflict(Option<String>),
    #[error("validation failed")]
    Validation(Option<String>),
    #[error("server error ({status})")]
    Server { status: u16, message: Option<String> },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid base_url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            400 | 422 => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }

    /// The message reported by the backend, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Validation(message)
            | Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Decode(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Text to show next to the form or list that triggered the call.
    pub fn user_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_string()
    }
}

/// Failure of the durable key/value storage backing the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}
