//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used across the engine test suites.

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
// Not every test binary pulls in the helpers.
#[allow(unused_imports)]
pub use helpers::{failing_source, source_with_records, FlakyStore};
