//! Collaborator trait definitions with mockall annotations
//!
//! The engine talks to two external systems: the spreadsheet source
//! that produces submission rows and the document datastore that owns
//! the persisted entities. Both are injected through these traits so
//! the reconcilers are unit-testable without a live backend.

use shared::SubmissionRecord;

use crate::error::EngineResult;

/// A stored document's fields, keyed by field name
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Spreadsheet-access collaborator
///
/// Returns rows already shaped as submission records. A rejection
/// here is fatal to the whole sync run.
#[mockall::automock]
#[async_trait::async_trait]
pub trait SubmissionSource: Send + Sync {
    /// Fetch all submission rows under the given source id
    async fn fetch_submissions(&self, source_id: &str) -> EngineResult<Vec<SubmissionRecord>>;
}

/// Minimal document datastore capability surface
///
/// Implementations must provide read-your-writes consistency for the
/// lookup-then-write sequence inside a single reconciler call.
/// Cross-call transactions are not assumed: two concurrent syncs for
/// the same teacher may race on the same classroom, last write wins.
#[mockall::automock]
#[async_trait::async_trait]
pub trait Datastore: Send + Sync {
    /// Find at most one document whose fields equal every entry in `filter`
    ///
    /// # Returns
    /// The document id and its fields, or `None` when nothing matches
    async fn find_one(&self, collection: &str, filter: Document) -> EngineResult<Option<(String, Document)>>;

    /// Insert a new document and return its generated id
    async fn insert(&self, collection: &str, fields: Document) -> EngineResult<String>;

    /// Merge `fields` into the document with the given id
    ///
    /// Fields absent from `fields` keep their stored values.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> EngineResult<()>;
}
