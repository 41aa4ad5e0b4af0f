//! Session Store - the single current-identity slot
//!
//! Holds at most one authenticated identity in memory, mirrored to a
//! `StorageBackend` so it survives a "page reload" (a fresh process pointed
//! at the same storage). Reads fail soft: a missing, malformed, or
//! stale-schema blob is simply "no session".

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::Identity;
use crate::storage::StorageBackend;

/// Default storage key for the persisted session blob
pub const SESSION_KEY: &str = "portal_session";

/// Version of the persisted session schema. Bump on any layout change so a
/// future format can migrate or reject stale data instead of misparsing it.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    schema: u32,
    identity: Identity,
}

/// Exclusive owner of the persisted session and the in-memory current
/// identity. Constructed once per process; page reload is the only teardown.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
    key: String,
    current: Option<Identity>,
}

impl SessionStore {
    /// Create a store over the given backend using the default session key
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_key(backend, SESSION_KEY)
    }

    /// Create a store using a custom storage key
    #[must_use]
    pub fn with_key(backend: Box<dyn StorageBackend>, key: &str) -> Self {
        Self {
            backend,
            key: key.to_string(),
            current: None,
        }
    }

    /// Rehydrate the in-memory slot from persisted storage.
    ///
    /// Fails soft: absence, malformed JSON, and a schema mismatch all yield
    /// `None` and leave the slot empty. Never returns an error to the caller.
    pub fn load(&mut self) -> Option<Identity> {
        let Some(raw) = self.backend.get(&self.key) else {
            self.current = None;
            return None;
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(persisted) if persisted.schema == SCHEMA_VERSION => {
                self.current = Some(persisted.identity.clone());
                Some(persisted.identity)
            }
            Ok(persisted) => {
                log::debug!(
                    "ignoring persisted session with schema {} (expected {SCHEMA_VERSION})",
                    persisted.schema
                );
                self.current = None;
                None
            }
            Err(err) => {
                log::debug!("ignoring malformed persisted session: {err}");
                self.current = None;
                None
            }
        }
    }

    /// Overwrite the persisted session and the in-memory slot.
    ///
    /// Storage is written first; the slot is only updated once the write
    /// succeeded, so a failure leaves memory and storage in lockstep.
    ///
    /// # Errors
    /// Returns an error if serialization or the storage write fails. The
    /// in-memory slot is unchanged in that case.
    pub fn save(&mut self, identity: Identity) -> Result<()> {
        let persisted = PersistedSession {
            schema: SCHEMA_VERSION,
            identity,
        };
        let raw = serde_json::to_string(&persisted)?;
        self.backend.put(&self.key, &raw)?;
        self.current = Some(persisted.identity);
        Ok(())
    }

    /// Remove the persisted session and reset the slot to absent.
    ///
    /// Idempotent. A storage failure is logged and does not surface; the
    /// in-memory slot is cleared regardless so the process observes the
    /// logged-out state it asked for.
    pub fn clear(&mut self) {
        if let Err(err) = self.backend.remove(&self.key) {
            log::warn!("failed to remove persisted session: {err}");
        }
        self.current = None;
    }

    /// The in-memory current identity; never touches persistent storage
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }
}
