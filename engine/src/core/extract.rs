//! Pure extraction of classroom and student entities from raw rows
//!
//! Extraction is a single synchronous pass over the input: no I/O, no
//! side effects, deterministic for a given input order. Malformed
//! rows are silently skipped; that is a filtering policy, not a
//! failure.

use std::collections::HashMap;

use shared::SubmissionRecord;

use crate::core::naming::{AssignmentPrefixNaming, ClassroomNaming};

/// A classroom assembled from submission rows, keyed by course code
///
/// Lives only for the duration of one sync run; it is input to
/// reconciliation, never persisted directly.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedClassroom {
    pub course_code: String,
    pub name: String,
    /// Student emails in first-seen order, duplicate-free
    pub student_emails: Vec<String>,
}

/// A student identity assembled from submission rows, keyed by email
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedStudent {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    /// Course ids in first-seen order, duplicate-free
    pub course_ids: Vec<String>,
}

/// Why a row was dropped during extraction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingCourseId,
    MissingFirstName,
    MissingEmail,
}

/// A row that passed validation, with trimmed field views
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidRecord<'a> {
    pub course_id: &'a str,
    pub assignment_title: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

/// Validate one raw row
///
/// The skip policy is deliberately a sum type so callers can audit
/// what was dropped instead of it happening implicitly.
pub fn validate(record: &SubmissionRecord) -> Result<ValidRecord<'_>, SkipReason> {
    let course_id = record.course_id.trim();
    if course_id.is_empty() {
        return Err(SkipReason::MissingCourseId);
    }
    let first_name = record.student_first_name.trim();
    if first_name.is_empty() {
        return Err(SkipReason::MissingFirstName);
    }
    let email = record.student_email.trim();
    if email.is_empty() {
        return Err(SkipReason::MissingEmail);
    }

    Ok(ValidRecord {
        course_id,
        assignment_title: record.assignment_title.trim(),
        first_name,
        last_name: record.student_last_name.trim(),
        email,
    })
}

/// Both entity sets produced by one extraction pass
///
/// Iteration order over classrooms and students is the order their
/// keys were first seen in the input. Hash map iteration order is
/// never relied on: the vectors are authoritative, the index maps
/// only serve lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    classrooms: Vec<ExtractedClassroom>,
    classroom_index: HashMap<String, usize>,
    students: Vec<ExtractedStudent>,
    student_index: HashMap<String, usize>,
}

impl Extraction {
    /// Classrooms in first-seen order
    pub fn classrooms(&self) -> &[ExtractedClassroom] {
        &self.classrooms
    }

    /// Students in first-seen order
    pub fn students(&self) -> &[ExtractedStudent] {
        &self.students
    }

    /// Look up a classroom by its course code
    pub fn classroom(&self, course_code: &str) -> Option<&ExtractedClassroom> {
        self.classroom_index.get(course_code).map(|&i| &self.classrooms[i])
    }

    /// Look up a student by email
    pub fn student(&self, email: &str) -> Option<&ExtractedStudent> {
        self.student_index.get(email).map(|&i| &self.students[i])
    }

    pub fn is_empty(&self) -> bool {
        self.classrooms.is_empty() && self.students.is_empty()
    }

    fn add_record(&mut self, record: ValidRecord<'_>, naming: &dyn ClassroomNaming) {
        // Classroom entry: name is fixed by the first row seen for the
        // course; later rows only ever grow the email list.
        let classroom_pos = match self.classroom_index.get(record.course_id) {
            Some(&i) => i,
            None => {
                self.classrooms.push(ExtractedClassroom {
                    course_code: record.course_id.to_string(),
                    name: naming.classroom_name(record.course_id, record.assignment_title),
                    student_emails: Vec::new(),
                });
                let i = self.classrooms.len() - 1;
                self.classroom_index.insert(record.course_id.to_string(), i);
                i
            }
        };
        let classroom = &mut self.classrooms[classroom_pos];
        if !classroom.student_emails.iter().any(|e| e == record.email) {
            classroom.student_emails.push(record.email.to_string());
        }

        // Student entry: name fields are last-write-wins within one
        // pass; the course list grows in first-seen order.
        let display_name = display_name(record.first_name, record.last_name, record.email);
        match self.student_index.get(record.email) {
            Some(&i) => {
                let student = &mut self.students[i];
                student.first_name = record.first_name.to_string();
                student.last_name = record.last_name.to_string();
                student.display_name = display_name;
                if !student.course_ids.iter().any(|c| c == record.course_id) {
                    student.course_ids.push(record.course_id.to_string());
                }
            }
            None => {
                self.students.push(ExtractedStudent {
                    email: record.email.to_string(),
                    first_name: record.first_name.to_string(),
                    last_name: record.last_name.to_string(),
                    display_name,
                    course_ids: vec![record.course_id.to_string()],
                });
                self.student_index
                    .insert(record.email.to_string(), self.students.len() - 1);
            }
        }
    }
}

/// Derive a display name from trimmed name parts, falling back to the
/// email local-part when both are blank
fn display_name(first: &str, last: &str, email: &str) -> String {
    let joined = format!("{first} {last}");
    let joined = joined.trim();
    if joined.is_empty() {
        email.split('@').next().unwrap_or(email).to_string()
    } else {
        joined.to_string()
    }
}

/// Extract deduplicated classroom and student sets from raw rows
/// using the default naming strategy
pub fn extract(records: &[SubmissionRecord]) -> Extraction {
    extract_with_naming(records, &AssignmentPrefixNaming)
}

/// Extract with an explicit classroom naming strategy
pub fn extract_with_naming(records: &[SubmissionRecord], naming: &dyn ClassroomNaming) -> Extraction {
    let mut extraction = Extraction::default();
    for record in records {
        if let Ok(valid) = validate(record) {
            extraction.add_record(valid, naming);
        }
    }
    extraction
}
