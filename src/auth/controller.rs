//! Auth Controller - the session lifecycle state machine
//!
//! Two states: `Anonymous` and `Authenticated(Identity)`. Every committed
//! transition routes through the [`SessionStore`] (never raw storage) and is
//! then broadcast on the [`AuthBridge`]; rejected transitions leave the state
//! untouched and publish nothing.

use chrono::Utc;

use crate::bridge::AuthBridge;
use crate::directory::{DirectoryEntry, DirectoryError, LocalDirectory};
use crate::models::{AuthRequest, Identity, LoginRequest, RegistrationRequest};
use crate::session::SessionStore;

use super::credential::decode_credential;
use super::error::AuthError;

/// Observable state of the auth machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Identity),
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(identity) => Some(identity),
        }
    }
}

/// Coordinates the session store, local directory, and notification bridge.
///
/// Constructed once per process; `bootstrap` rehydrates any persisted
/// session, then user-driven events arrive through the transition methods or
/// the [`handle`](AuthController::handle) dispatch entry point.
pub struct AuthController {
    store: SessionStore,
    directory: LocalDirectory,
    bridge: AuthBridge,
}

impl AuthController {
    #[must_use]
    pub fn new(store: SessionStore, directory: LocalDirectory) -> Self {
        Self {
            store,
            directory,
            bridge: AuthBridge::new(),
        }
    }

    /// Register a listener for auth-changed notifications
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(Option<&Identity>) + 'static,
    {
        self.bridge.subscribe(listener);
    }

    /// Rehydrate from persisted storage at page load.
    ///
    /// A present, well-formed session transitions to `Authenticated` without
    /// re-saving. The resulting state is broadcast either way so listeners
    /// can render the initial chrome.
    pub fn bootstrap(&mut self) -> AuthState {
        match self.store.load() {
            Some(identity) => {
                log::info!("restored session for {}", identity.display_name);
            }
            None => log::debug!("no persisted session found"),
        }
        self.publish();
        self.state()
    }

    /// Current state of the machine
    #[must_use]
    pub fn state(&self) -> AuthState {
        match self.store.current() {
            Some(identity) => AuthState::Authenticated(identity.clone()),
            None => AuthState::Anonymous,
        }
    }

    /// The current identity, if authenticated
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.store.current()
    }

    /// Dispatch table entry point: `(state, event) -> transition`.
    ///
    /// # Errors
    /// Returns the rejection for the attempted transition; the state machine
    /// stays put and nothing is broadcast.
    pub fn handle(&mut self, request: AuthRequest) -> Result<AuthState, AuthError> {
        match request {
            AuthRequest::Login(request) => {
                self.login(&request).map(AuthState::Authenticated)
            }
            AuthRequest::Register(request) => {
                self.register(&request).map(AuthState::Authenticated)
            }
            AuthRequest::ExternalCredential { credential } => self
                .submit_credential(&credential)
                .map(AuthState::Authenticated),
            AuthRequest::Logout => {
                self.logout();
                Ok(AuthState::Anonymous)
            }
        }
    }

    /// Local login: both fields non-empty, `display_name == username`.
    ///
    /// # Errors
    /// `Validation` if either field is empty or the machine is not Anonymous.
    pub fn login(&mut self, request: &LoginRequest) -> Result<Identity, AuthError> {
        self.ensure_anonymous("login")?;

        let username = request.username.trim();
        let password = request.password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "username and password are both required".to_string(),
            ));
        }

        log::debug!("local login for {username}");
        self.commit(Identity::local(username))
    }

    /// Local registration: required fields present, secret length >= 6,
    /// username and email unused; inserts the directory entry, then
    /// authenticates.
    ///
    /// # Errors
    /// `Validation` for missing fields or a short secret, `Conflict` for a
    /// duplicate username or email.
    pub fn register(&mut self, request: &RegistrationRequest) -> Result<Identity, AuthError> {
        self.ensure_anonymous("registration")?;

        let display_name = request.display_name.trim();
        let username = request.username.trim();
        let email = request.email.trim();
        let secret = request.secret.trim();

        if display_name.is_empty() || username.is_empty() || email.is_empty() || secret.is_empty() {
            return Err(AuthError::Validation(
                "all registration fields are required".to_string(),
            ));
        }
        if secret.chars().count() < 6 {
            return Err(AuthError::Validation(
                "password must be at least 6 characters".to_string(),
            ));
        }

        let entry = DirectoryEntry {
            username: username.to_string(),
            display_name: display_name.to_string(),
            email: email.to_string(),
            secret: secret.to_string(),
            chapter: request.chapter.clone(),
            role: request.role.clone(),
            registered_at: Utc::now(),
        };
        self.directory.insert(entry).map_err(|err| match err {
            DirectoryError::DuplicateUsername(_) | DirectoryError::DuplicateEmail(_) => {
                AuthError::Conflict(err.to_string())
            }
            DirectoryError::Storage(msg) => AuthError::Internal(msg),
        })?;

        log::info!("registered {username}");
        let mut identity = Identity::local(display_name);
        identity.email = Some(email.to_string());
        self.commit(identity)
    }

    /// External credential acceptance: decodes the token and authenticates
    /// with `Provider::External`.
    ///
    /// # Errors
    /// `Decode` for a malformed credential, `Validation` if not Anonymous.
    pub fn submit_credential(&mut self, credential: &str) -> Result<Identity, AuthError> {
        self.ensure_anonymous("external sign-in")?;

        let claims = decode_credential(credential)?;
        log::info!("external sign-in as {}", claims.display_name);
        self.commit(Identity::external(
            &claims.display_name,
            claims.email.as_deref(),
            claims.picture_url.as_deref(),
        ))
    }

    /// Logout: always transitions to Anonymous, clears persisted state, and
    /// broadcasts. Safe to call from any state.
    pub fn logout(&mut self) {
        self.store.clear();
        log::info!("logged out");
        self.publish();
    }

    /// Read-only view of the local directory
    #[must_use]
    pub fn directory(&self) -> &LocalDirectory {
        &self.directory
    }

    fn ensure_anonymous(&self, event: &str) -> Result<(), AuthError> {
        match self.store.current() {
            None => Ok(()),
            Some(identity) => Err(AuthError::Validation(format!(
                "{event} rejected: already signed in as {}",
                identity.display_name
            ))),
        }
    }

    fn commit(&mut self, identity: Identity) -> Result<Identity, AuthError> {
        self.store
            .save(identity.clone())
            .map_err(|err| AuthError::Internal(err.to_string()))?;
        self.publish();
        Ok(identity)
    }

    fn publish(&self) {
        self.bridge.publish(self.store.current());
    }
}
