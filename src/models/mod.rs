//! Core data types shared across the portal
//!
//! # Modules
//!
//! - [`identity`] - The authenticated principal and its provider tag
//! - [`requests`] - Tagged request records for each auth transition

pub mod identity;
pub mod requests;

// Re-export commonly used items for convenience
pub use identity::{Identity, Provider};
pub use requests::{AuthRequest, LoginRequest, RegistrationRequest};
