//! Core shared types for roster synchronization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row from the spreadsheet source: a single student's submission
/// to a single assignment.
///
/// This is untrusted external input. Any field may be empty; the
/// extractor decides what to keep. `submitted_at` is carried metadata
/// and plays no part in reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub course_id: String,
    pub assignment_title: String,
    pub student_first_name: String,
    pub student_last_name: String,
    pub student_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Account role in the platform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => write!(f, "teacher"),
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Aggregated outcome of one sync run
///
/// Partial success is representable: some entities may have synced
/// while others landed in `errors`. `success` is true only when the
/// error list is empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    pub classrooms_created: u32,
    pub classrooms_updated: u32,
    pub students_created: u32,
    pub students_updated: u32,
    pub errors: Vec<String>,
}

impl SyncReport {
    /// Total number of entities that were actually written
    pub fn total_synced(&self) -> u32 {
        self.classrooms_created + self.classrooms_updated + self.students_created + self.students_updated
    }

    /// Report for a sync that aborted before any write happened
    pub fn aborted(error: String) -> Self {
        Self {
            success: false,
            errors: vec![error],
            ..Self::default()
        }
    }
}
