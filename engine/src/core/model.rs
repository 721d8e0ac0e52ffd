//! Persisted entity shapes owned by the document datastore
//!
//! Field names follow the datastore's camelCase document convention.
//! These structs describe the full document shape on insert; updates
//! go through partial documents so sync never replaces an entity
//! wholesale.

use serde::{Deserialize, Serialize};
use shared::Role;

use crate::error::{EngineError, EngineResult};
use crate::traits::Document;

/// Collection holding classroom documents
pub const CLASSROOMS: &str = "classrooms";

/// Collection holding user documents (students and teachers alike)
pub const USERS: &str = "users";

/// A classroom scoped to exactly one owning teacher
///
/// At most one active classroom exists per `(teacherId, courseCode)`
/// pair. `studentIds` only grows under reconciliation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub name: String,
    pub course_code: String,
    pub teacher_id: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub is_active: bool,
}

/// A platform account, student or otherwise
///
/// `email` is the identity key. Reconciliation never changes an
/// existing user's `role`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub classroom_ids: Vec<String>,
    pub is_active: bool,
}

/// Serialize an entity into a document for insertion
pub fn to_document<T: Serialize>(entity: &T) -> EngineResult<Document> {
    match serde_json::to_value(entity)? {
        serde_json::Value::Object(fields) => Ok(fields),
        other => Err(EngineError::decode(format!(
            "entity serialized to non-object value: {other}"
        ))),
    }
}

/// Decode a stored document back into an entity
pub fn from_document<T: for<'de> Deserialize<'de>>(fields: Document) -> EngineResult<T> {
    serde_json::from_value(serde_json::Value::Object(fields))
        .map_err(|e| EngineError::decode(e.to_string()))
}
