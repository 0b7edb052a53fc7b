//! Shared test utilities for the sitepath workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`sandbox`]: [`Sandbox`] with candidate directories and sample origins
//! - [`perms`]: permission helpers for fallback and failure tests

pub mod perms;
pub mod sandbox;

pub use perms::{is_root, make_readonly, make_writable};
pub use sandbox::Sandbox;
