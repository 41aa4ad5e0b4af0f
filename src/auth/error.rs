//! Auth error taxonomy
//!
//! Every variant is recoverable at the point of the triggering action: the
//! state machine stays put and the message is surfaced to the user. Nothing
//! here is fatal and nothing is retried automatically.

use std::fmt;

/// Errors reported by rejected auth transitions
#[derive(Debug)]
pub enum AuthError {
    /// Missing or malformed user input
    Validation(String),
    /// Duplicate username/email in local registration
    Conflict(String),
    /// Malformed external credential
    Decode(String),
    /// Remote call failed (network-backed variant only)
    #[cfg(feature = "network")]
    Transport(crate::api::ApiError),
    /// Infrastructure failure (storage write), not part of user validation
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(msg) => write!(f, "Validation error: {msg}"),
            AuthError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AuthError::Decode(msg) => write!(f, "Credential decode error: {msg}"),
            #[cfg(feature = "network")]
            AuthError::Transport(err) => write!(f, "Transport error: {err}"),
            AuthError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "network")]
            AuthError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "network")]
impl From<crate::api::ApiError> for AuthError {
    fn from(err: crate::api::ApiError) -> Self {
        AuthError::Transport(err)
    }
}
