#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the chapterhouse library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(feature = "network")]
pub mod api;
pub mod auth;
pub mod bridge;
pub mod directory;
pub mod models;
pub mod session;
pub mod settings;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use auth::{AuthController, AuthError, AuthState};
pub use bridge::AuthBridge;
pub use directory::LocalDirectory;
pub use models::{AuthRequest, Identity, LoginRequest, Provider, RegistrationRequest};
pub use session::SessionStore;
pub use settings::PortalSettings;
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
