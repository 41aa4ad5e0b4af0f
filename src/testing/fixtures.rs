//! Pre-built test data

use crate::auth::AuthController;
use crate::directory::LocalDirectory;
use crate::models::{Identity, RegistrationRequest};
use crate::session::SessionStore;
use crate::storage::MemoryBackend;

use super::builders::CredentialBuilder;

/// Canned fixtures shared by unit and integration tests
pub struct TestFixtures;

impl TestFixtures {
    /// A locally established identity
    #[must_use]
    pub fn local_identity() -> Identity {
        Identity::local("Ada Lovelace")
    }

    /// An identity as asserted by the external provider
    #[must_use]
    pub fn external_identity() -> Identity {
        Identity::external(
            "Grace Hopper",
            Some("grace@example.com"),
            Some("https://example.com/grace.png"),
        )
    }

    /// The standard registration request used across tests
    #[must_use]
    pub fn registration() -> RegistrationRequest {
        RegistrationRequest {
            display_name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@x.com".to_string(),
            secret: "abcdef".to_string(),
            chapter: Some("Alpha Phi".to_string()),
            role: Some("Member".to_string()),
        }
    }

    /// A well-formed external credential with name and email claims
    #[must_use]
    pub fn credential(name: &str, email: &str) -> String {
        CredentialBuilder::new().name(name).email(email).build()
    }

    /// A fully wired controller over in-memory storage
    #[must_use]
    pub fn controller() -> AuthController {
        let store = SessionStore::new(Box::new(MemoryBackend::new()));
        let directory = LocalDirectory::new(Box::new(MemoryBackend::new()));
        AuthController::new(store, directory)
    }
}
