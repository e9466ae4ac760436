//! Gateway error taxonomy.

use thiserror::Error;

/// Uniform classification of a failed gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response received from the server.
    Network,
    /// Request aborted by the client-side timeout.
    Timeout,
    /// HTTP 401; the stored session has been cleared.
    SessionExpired,
    /// HTTP 403.
    Forbidden,
    /// HTTP 404.
    NotFound,
    /// HTTP 500.
    Server,
    /// HTTP 503.
    Unavailable,
    /// Client-side validation failure, caught before any network call.
    Validation,
    /// Any other failure; the original server message is preserved when
    /// present.
    Other,
}

/// Error constructed once at the response boundary and never mutated
/// afterwards. The message is human-readable and ready to surface in a
/// transient notification.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(kind: ErrorKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }
}

/// Result type for gateway calls.
pub type ApiResult<T> = Result<T, ApiError>;
