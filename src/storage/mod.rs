//! Key/value persistence backends
//!
//! The browser original keeps everything in `localStorage`; this module
//! abstracts that surface so the session store and local directory can run
//! against an in-memory map in tests and a file-per-key layout when the
//! process needs state to survive a restart.
//!
//! # Modules
//!
//! - [`memory`] - `HashMap`-backed storage for tests and demos
//! - [`file`] - One file per key under a data directory

pub mod file;
pub mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use anyhow::Result;

/// Durable key/value storage with `localStorage` semantics.
///
/// Keys are simple identifiers chosen by this crate (no user input). A
/// missing key is not an error; reads fail soft.
pub trait StorageBackend {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value
    ///
    /// # Errors
    /// Returns an error if the backing medium rejects the write.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`; removing an absent key is a no-op
    ///
    /// # Errors
    /// Returns an error if the backing medium rejects the removal.
    fn remove(&mut self, key: &str) -> Result<()>;
}
