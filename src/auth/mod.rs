//! Authentication Module
//!
//! The auth controller is the state machine at the center of the portal: it
//! validates user-driven events, routes every committed transition through
//! the session store, and broadcasts the result on the notification bridge.
//!
//! # Modules
//!
//! - [`controller`] - The two-state machine and its dispatch table
//! - [`credential`] - External identity credential decoding
//! - [`error`] - The recoverable error taxonomy

pub mod controller;
pub mod credential;
pub mod error;

// Re-export commonly used items for convenience
pub use controller::{AuthController, AuthState};
pub use credential::{decode_credential, IdentityClaims};
pub use error::AuthError;
