//! Test helper utilities for engine tests

use engine::services::MemoryDatastore;
use engine::traits::MockSubmissionSource;
use engine::{Datastore, Document, EngineError, EngineResult};
use serde_json::json;
use shared::SubmissionRecord;

/// A submission source that yields a fixed set of records
pub fn source_with_records(records: Vec<SubmissionRecord>) -> MockSubmissionSource {
    let mut source = MockSubmissionSource::new();
    source
        .expect_fetch_submissions()
        .returning(move |_| Ok(records.clone()));
    source
}

/// A submission source whose fetch always fails
pub fn failing_source(message: &str) -> MockSubmissionSource {
    let message = message.to_string();
    let mut source = MockSubmissionSource::new();
    source
        .expect_fetch_submissions()
        .returning(move |_| Err(EngineError::fetch(message.clone())));
    source
}

/// Datastore wrapper that fails user inserts for one specific email
///
/// Everything else delegates to the wrapped in-memory store, which
/// makes it easy to exercise per-entity failure isolation in an
/// otherwise healthy batch.
#[derive(Clone)]
pub struct FlakyStore {
    inner: MemoryDatastore,
    fail_email: String,
}

impl FlakyStore {
    pub fn new(inner: MemoryDatastore, fail_email: &str) -> Self {
        Self {
            inner,
            fail_email: fail_email.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Datastore for FlakyStore {
    async fn find_one(&self, collection: &str, filter: Document) -> EngineResult<Option<(String, Document)>> {
        self.inner.find_one(collection, filter).await
    }

    async fn insert(&self, collection: &str, fields: Document) -> EngineResult<String> {
        if collection == "users" && fields.get("email") == Some(&json!(self.fail_email)) {
            return Err(EngineError::persistence(collection, "simulated write failure"));
        }
        self.inner.insert(collection, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> EngineResult<()> {
        self.inner.update(collection, id, fields).await
    }
}
