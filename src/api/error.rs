//! Transport error taxonomy for the remote API collaborator

use std::fmt;

/// Errors from remote API calls. Never fatal; recovered at the call site.
#[derive(Debug)]
pub enum ApiError {
    /// The base URL or client configuration is invalid
    Configuration(String),
    /// Authorization failed; the caller should treat this as an implicit
    /// logout signal and clear the session
    Unauthorized,
    /// The server replied with a non-success status. `message` is the
    /// server's reported message when the body carried one, otherwise a
    /// generic status-coded message.
    Status { status: u16, message: String },
    /// The request could not be sent or the response could not be read
    Network(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            ApiError::Unauthorized => write!(f, "Session expired. Please log in again."),
            ApiError::Status { status, message } => write!(f, "API error {status}: {message}"),
            ApiError::Network(msg) => write!(f, "Network error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
