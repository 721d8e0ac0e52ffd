//! Roster reconciliation engine
//!
//! This library converts a flat, untrusted stream of submission rows
//! (fetched from a spreadsheet source) into canonical classroom and
//! student entities, and idempotently merges them into a shared
//! document datastore. Reconciliation never overwrites a stronger
//! role assignment and never shrinks a classroom's membership.

pub mod core;
pub mod error;
pub mod services;
pub mod sync;
pub mod traits;

// Re-export commonly used types
pub use core::extract::{extract, extract_with_naming, Extraction, ExtractedClassroom, ExtractedStudent};
pub use core::naming::{AssignmentPrefixNaming, ClassroomNaming};
pub use error::{EngineError, EngineResult};
pub use sync::{ClassroomSync, StudentSync, SyncEngine};
pub use traits::{Datastore, Document, SubmissionSource};
