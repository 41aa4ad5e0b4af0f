//! Remote API collaborator (network-backed variant)
//!
//! A thin request helper for deployments with a real backend: plain data
//! payloads in, parsed response data out, the server's reported message on
//! failure. A bearer credential header is attached to authenticated calls,
//! and an authorization failure is surfaced as [`ApiError::Unauthorized`] so
//! the caller can treat it as an implicit logout signal. No retries, no
//! backoff, no protocol logic.
//!
//! # Modules
//!
//! - [`client`] - The `reqwest`-based [`PortalApi`] and the
//!   [`RemoteAuthService`] trait seam
//! - [`error`] - Transport error taxonomy
//! - [`types`] - Request/response payload records

pub mod client;
pub mod error;
pub mod types;

pub use client::{PortalApi, RemoteAuthService};
pub use error::ApiError;
pub use types::{AuthResponse, RemoteUser};
