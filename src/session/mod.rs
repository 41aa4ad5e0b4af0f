//! Session Management Module
//!
//! The session store is the single source of truth for the current identity.
//! It owns both the in-memory slot and its mirror in persistent storage and
//! keeps the two in lockstep; nothing else in the crate touches the persisted
//! session directly.

pub mod store;

pub use store::{SessionStore, SESSION_KEY};
