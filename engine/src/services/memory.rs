//! In-memory document datastore
//!
//! Backs the integration tests and the demo server's default store
//! mode. Collections are insertion-ordered vectors of documents, so
//! `find_one` scans deterministically. Cloning shares the underlying
//! storage.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::traits::{Datastore, Document};

type Collections = HashMap<String, Vec<(String, Document)>>;

#[derive(Clone, Default)]
pub struct MemoryDatastore {
    collections: Arc<Mutex<Collections>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in a collection
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().await;
        collections.get(collection).map(|docs| docs.len()).unwrap_or(0)
    }

    /// Snapshot of a collection in insertion order
    pub async fn dump(&self, collection: &str) -> Vec<(String, Document)> {
        let collections = self.collections.lock().await;
        collections.get(collection).cloned().unwrap_or_default()
    }

    /// Fetch one document by its id
    pub async fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let collections = self.collections.lock().await;
        collections
            .get(collection)?
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, fields)| fields.clone())
    }
}

fn matches(fields: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| fields.get(key) == Some(expected))
}

#[async_trait::async_trait]
impl Datastore for MemoryDatastore {
    async fn find_one(&self, collection: &str, filter: Document) -> EngineResult<Option<(String, Document)>> {
        let collections = self.collections.lock().await;
        let found = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|(_, fields)| matches(fields, &filter)))
            .cloned();
        Ok(found)
    }

    async fn insert(&self, collection: &str, fields: Document) -> EngineResult<String> {
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), fields));
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> EngineResult<()> {
        let mut collections = self.collections.lock().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| EngineError::persistence(collection, format!("no such collection for id '{id}'")))?;
        let (_, existing) = docs
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .ok_or_else(|| EngineError::persistence(collection, format!("no document with id '{id}'")))?;
        for (key, value) in fields {
            existing.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, serde_json::Value)]) -> Document {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn test_insert_then_find_one() {
        let store = MemoryDatastore::new();
        let id = store
            .insert("users", doc(&[("email", json!("a@school.edu"))]))
            .await
            .unwrap();

        let found = store
            .find_one("users", doc(&[("email", json!("a@school.edu"))]))
            .await
            .unwrap();
        assert_eq!(found.map(|(found_id, _)| found_id), Some(id));
    }

    #[tokio::test]
    async fn test_find_one_requires_all_filter_fields() {
        let store = MemoryDatastore::new();
        store
            .insert(
                "classrooms",
                doc(&[("teacherId", json!("t1")), ("courseCode", json!("CS101"))]),
            )
            .await
            .unwrap();

        let miss = store
            .find_one(
                "classrooms",
                doc(&[("teacherId", json!("t2")), ("courseCode", json!("CS101"))]),
            )
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDatastore::new();
        let id = store
            .insert("users", doc(&[("email", json!("a@school.edu")), ("isActive", json!(false))]))
            .await
            .unwrap();

        store
            .update("users", &id, doc(&[("isActive", json!(true))]))
            .await
            .unwrap();

        let fields = store.get("users", &id).await.unwrap();
        assert_eq!(fields["email"], json!("a@school.edu"));
        assert_eq!(fields["isActive"], json!(true));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_persistence_error() {
        let store = MemoryDatastore::new();
        let result = store.update("users", "missing", Document::new()).await;
        assert!(matches!(result, Err(EngineError::Persistence { .. })));
    }
}
