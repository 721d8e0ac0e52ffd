//! Shared types for the roster sync service
//!
//! Contains only the types that cross crate boundaries: the raw
//! submission record shape, user roles, and the sync report returned
//! to the HTTP layer. Component-internal types (extracted entities,
//! persisted documents) live in their respective crates.

pub mod logging;
pub mod types;

pub use types::*;
