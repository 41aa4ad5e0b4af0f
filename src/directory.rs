//! Local Directory - the mock username/email registry
//!
//! Backs the local registration path only. Entries are stored as one JSON
//! array in the storage backend. The stored secret is opaque and unhashed;
//! this is a demo directory and must never be treated as a credential store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::StorageBackend;

/// Default storage key for the serialized directory
pub const DIRECTORY_KEY: &str = "portal_directory";

/// A registered member of the local directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// Unique key
    pub username: String,
    pub display_name: String,
    /// Unique across entries
    pub email: String,
    /// Opaque demo secret, stored as-is
    pub secret: String,
    #[serde(default)]
    pub chapter: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Directory operation errors
#[derive(Debug)]
pub enum DirectoryError {
    /// The username is already registered
    DuplicateUsername(String),
    /// The email is already registered under another username
    DuplicateEmail(String),
    /// The backing storage rejected the write
    Storage(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::DuplicateUsername(username) => {
                write!(f, "username {username} is already registered")
            }
            DirectoryError::DuplicateEmail(email) => {
                write!(f, "email {email} is already registered")
            }
            DirectoryError::Storage(msg) => write!(f, "directory storage failed: {msg}"),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// The local, non-secure registry used by the registration path
pub struct LocalDirectory {
    backend: Box<dyn StorageBackend>,
    key: String,
    entries: Vec<DirectoryEntry>,
}

impl LocalDirectory {
    /// Open the directory over the given backend, reading any persisted
    /// entries. A missing or malformed blob loads as an empty directory.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_key(backend, DIRECTORY_KEY)
    }

    /// Open the directory using a custom storage key
    #[must_use]
    pub fn with_key(backend: Box<dyn StorageBackend>, key: &str) -> Self {
        let entries = backend
            .get(key)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(entries) => Some(entries),
                Err(err) => {
                    log::debug!("ignoring malformed persisted directory: {err}");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            backend,
            key: key.to_string(),
            entries,
        }
    }

    /// Insert a new entry, enforcing unique username and unique email
    ///
    /// # Errors
    /// Returns `DuplicateUsername` / `DuplicateEmail` when the unique keys
    /// collide with an existing entry, or `Storage` if persisting fails (the
    /// in-memory directory is rolled back in that case).
    pub fn insert(&mut self, entry: DirectoryEntry) -> Result<(), DirectoryError> {
        if self.lookup(&entry.username).is_some() {
            return Err(DirectoryError::DuplicateUsername(entry.username));
        }
        if self.contains_email(&entry.email) {
            return Err(DirectoryError::DuplicateEmail(entry.email));
        }

        self.entries.push(entry);
        if let Err(err) = self.persist() {
            self.entries.pop();
            return Err(DirectoryError::Storage(err.to_string()));
        }
        Ok(())
    }

    /// Find an entry by username (case-insensitive)
    #[must_use]
    pub fn lookup(&self, username: &str) -> Option<&DirectoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.username.eq_ignore_ascii_case(username))
    }

    /// Whether any entry already uses this email (case-insensitive)
    #[must_use]
    pub fn contains_email(&self, email: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.email.eq_ignore_ascii_case(email))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.entries)?;
        self.backend.put(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn entry(username: &str, email: &str) -> DirectoryEntry {
        DirectoryEntry {
            username: username.to_string(),
            display_name: format!("{username} display"),
            email: email.to_string(),
            secret: "abcdef".to_string(),
            chapter: Some("Alpha Phi".to_string()),
            role: Some("Member".to_string()),
            registered_at: Utc::now(),
        }
    }

    fn memory_directory() -> LocalDirectory {
        LocalDirectory::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_insert_then_lookup() {
        let mut directory = memory_directory();
        directory.insert(entry("ada", "ada@x.com")).unwrap();

        let found = directory.lookup("ada").unwrap();
        assert_eq!(found.email, "ada@x.com");
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_duplicate_username_is_rejected() {
        let mut directory = memory_directory();
        directory.insert(entry("ada", "ada@x.com")).unwrap();

        let result = directory.insert(entry("ada", "other@x.com"));
        assert!(matches!(result, Err(DirectoryError::DuplicateUsername(_))));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut directory = memory_directory();
        directory.insert(entry("ada", "ada@x.com")).unwrap();

        let result = directory.insert(entry("grace", "ada@x.com"));
        assert!(matches!(result, Err(DirectoryError::DuplicateEmail(_))));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_username_match_is_case_insensitive() {
        let mut directory = memory_directory();
        directory.insert(entry("Ada", "ada@x.com")).unwrap();

        assert!(directory.lookup("ADA").is_some());
        assert!(matches!(
            directory.insert(entry("ada", "new@x.com")),
            Err(DirectoryError::DuplicateUsername(_))
        ));
    }

    #[test]
    fn test_malformed_persisted_blob_loads_empty() {
        let mut backend = MemoryBackend::new();
        backend.put(DIRECTORY_KEY, "not an array").unwrap();
        let directory = LocalDirectory::new(Box::new(backend));

        assert!(directory.is_empty());
    }
}
