//! Unified testing utilities for chapterhouse
//!
//! Consolidates test fixtures and builders so unit and integration tests
//! share one set of canned data instead of duplicating setup.
//!
//! ## Organization
//!
//! - [`fixtures`] - Pre-built test data (identities, requests, controllers)
//! - [`builders`] - Fluent builders for creating test objects

pub mod builders;
pub mod fixtures;

pub use builders::CredentialBuilder;
pub use fixtures::TestFixtures;
