//! Test fixtures and data for engine tests

use engine::Document;
use serde_json::json;
use shared::SubmissionRecord;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const TEACHER_ID: &'static str = "teacher-1";
    pub const SOURCE_ID: &'static str = "sheet-1";

    pub const JOHN: &'static str = "john@school.edu";
    pub const JANE: &'static str = "jane@school.edu";

    /// Build a single submission record
    pub fn record(course: &str, title: &str, first: &str, last: &str, email: &str) -> SubmissionRecord {
        SubmissionRecord {
            course_id: course.to_string(),
            assignment_title: title.to_string(),
            student_first_name: first.to_string(),
            student_last_name: last.to_string(),
            student_email: email.to_string(),
            submitted_at: None,
        }
    }

    /// Two courses, two students, one student in both courses
    pub fn scenario_records() -> Vec<SubmissionRecord> {
        vec![
            Self::record("CS101", "Essay One", "John", "Doe", Self::JOHN),
            Self::record("CS101", "Essay One", "Jane", "Smith", Self::JANE),
            Self::record("MATH201", "Problem Set", "John", "Doe", Self::JOHN),
        ]
    }

    /// A persisted teacher account document
    pub fn teacher_user_doc(email: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("email".to_string(), json!(email));
        doc.insert("displayName".to_string(), json!("Ms. Rivera"));
        doc.insert("role".to_string(), json!("teacher"));
        doc.insert("classroomIds".to_string(), json!([]));
        doc.insert("isActive".to_string(), json!(true));
        doc
    }
}
