//! Tagged request records for auth transitions
//!
//! Each user-driven event carries an explicit record instead of an ad hoc
//! payload, so the controller's dispatch table can match on `(state, event)`
//! without duck typing.

use serde::{Deserialize, Serialize};

/// Local login form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Local registration form submission.
///
/// `chapter` and `role` come from the registration form but are not required
/// by any transition guard; they are carried onto the directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub display_name: String,
    pub username: String,
    pub email: String,
    pub secret: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Auth events for the controller's dispatch entry point
///
/// This enum unifies the per-transition request data so callers can route
/// every event through a single `handle` call.
#[derive(Debug, Clone)]
pub enum AuthRequest {
    /// Local login form submitted
    Login(LoginRequest),
    /// Local registration form submitted
    Register(RegistrationRequest),
    /// Opaque credential received from the external identity provider
    ExternalCredential { credential: String },
    /// Logout requested
    Logout,
}
