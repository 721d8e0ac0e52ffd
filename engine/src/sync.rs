//! Sync orchestration and per-entity reconciliation
//!
//! The engine drives one linear pass per sync run: fetch rows,
//! extract entities, reconcile every student, then reconcile every
//! classroom with the student-id map accumulated along the way.
//! Students go first because classroom membership is expressed as
//! datastore ids, not raw emails. A fetch failure aborts the run;
//! every other failure is isolated to its entity and recorded in the
//! report.

use std::collections::HashMap;

use serde_json::json;
use shared::{Role, SyncReport};
use tracing::{debug, info, warn};

use crate::core::extract::{extract_with_naming, ExtractedClassroom, ExtractedStudent};
use crate::core::model::{self, Classroom, User, CLASSROOMS, USERS};
use crate::core::naming::{AssignmentPrefixNaming, ClassroomNaming};
use crate::error::EngineResult;
use crate::traits::{Datastore, Document, SubmissionSource};

/// Outcome of reconciling one student
///
/// `created` and `updated` both false means the email belongs to a
/// non-student account and the engine deliberately left it alone.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentSync {
    pub created: bool,
    pub updated: bool,
    pub user_id: String,
}

/// Outcome of reconciling one classroom
#[derive(Clone, Debug, PartialEq)]
pub struct ClassroomSync {
    pub created: bool,
    pub updated: bool,
    pub classroom_id: String,
}

/// The roster sync engine with injected collaborators
pub struct SyncEngine<S, D>
where
    S: SubmissionSource,
    D: Datastore,
{
    source: S,
    store: D,
    naming: Box<dyn ClassroomNaming>,
}

impl<S, D> SyncEngine<S, D>
where
    S: SubmissionSource,
    D: Datastore,
{
    /// Create a new engine with the default classroom naming strategy
    pub fn new(source: S, store: D) -> Self {
        Self {
            source,
            store,
            naming: Box::new(AssignmentPrefixNaming),
        }
    }

    /// Replace the classroom naming strategy
    pub fn with_naming(mut self, naming: impl ClassroomNaming + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Run one full sync of a teacher's roster from a spreadsheet source
    ///
    /// Never returns an error: every failure mode is folded into the
    /// report. The only abort path is the initial fetch, which yields
    /// a report with zero counts and a single error.
    pub async fn sync_from_sheets(&self, teacher_id: &str, source_id: &str) -> SyncReport {
        info!(teacher_id, source_id, "starting roster sync");

        let records = match self.source.fetch_submissions(source_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(teacher_id, source_id, error = %e, "submission fetch failed, aborting sync");
                return SyncReport::aborted(format!(
                    "failed to fetch submissions from source '{source_id}': {e}"
                ));
            }
        };
        debug!(count = records.len(), "fetched submission rows");

        let extraction = extract_with_naming(&records, self.naming.as_ref());
        debug!(
            classrooms = extraction.classrooms().len(),
            students = extraction.students().len(),
            "extraction complete"
        );

        let mut report = SyncReport::default();

        // All students settle (written or failed) before any classroom
        // is touched, so membership can be expressed as datastore ids.
        let mut student_ids_by_email: HashMap<String, String> = HashMap::new();
        for student in extraction.students() {
            match self.sync_student(student).await {
                Ok(outcome) => {
                    student_ids_by_email.insert(student.email.clone(), outcome.user_id);
                    if outcome.created {
                        report.students_created += 1;
                    } else if outcome.updated {
                        report.students_updated += 1;
                    }
                }
                Err(e) => {
                    warn!(email = %student.email, error = %e, "student reconciliation failed");
                    report
                        .errors
                        .push(format!("failed to sync student '{}': {e}", student.email));
                }
            }
        }

        for classroom in extraction.classrooms() {
            match self.sync_classroom(teacher_id, classroom, &student_ids_by_email).await {
                Ok(outcome) => {
                    if outcome.created {
                        report.classrooms_created += 1;
                    } else if outcome.updated {
                        report.classrooms_updated += 1;
                    }
                }
                Err(e) => {
                    warn!(course_code = %classroom.course_code, error = %e, "classroom reconciliation failed");
                    report.errors.push(format!(
                        "failed to sync classroom '{}': {e}",
                        classroom.course_code
                    ));
                }
            }
        }

        report.success = report.errors.is_empty();
        info!(
            teacher_id,
            classrooms_created = report.classrooms_created,
            classrooms_updated = report.classrooms_updated,
            students_created = report.students_created,
            students_updated = report.students_updated,
            errors = report.errors.len(),
            "roster sync finished"
        );
        report
    }

    /// Idempotently upsert one student identity
    ///
    /// An email already bound to a non-student account is left
    /// untouched; the existing id is still returned so the classroom
    /// reconciler can link it.
    pub async fn sync_student(&self, extracted: &ExtractedStudent) -> EngineResult<StudentSync> {
        let mut filter = Document::new();
        filter.insert("email".to_string(), json!(extracted.email));

        match self.store.find_one(USERS, filter).await? {
            None => {
                let user = User {
                    email: extracted.email.clone(),
                    display_name: extracted.display_name.clone(),
                    role: Role::Student,
                    // Linkage is the classroom reconciler's job; an
                    // empty list here avoids a circular write order.
                    classroom_ids: Vec::new(),
                    is_active: true,
                };
                let user_id = self.store.insert(USERS, model::to_document(&user)?).await?;
                debug!(email = %extracted.email, %user_id, "created student");
                Ok(StudentSync {
                    created: true,
                    updated: false,
                    user_id,
                })
            }
            Some((user_id, fields)) => {
                let existing: User = model::from_document(fields)?;
                if existing.role != Role::Student {
                    debug!(email = %extracted.email, role = %existing.role, "role conflict, leaving account untouched");
                    return Ok(StudentSync {
                        created: false,
                        updated: false,
                        user_id,
                    });
                }

                let mut fields = Document::new();
                fields.insert("displayName".to_string(), json!(extracted.display_name));
                fields.insert("isActive".to_string(), json!(true));
                self.store.update(USERS, &user_id, fields).await?;
                debug!(email = %extracted.email, %user_id, "refreshed student");
                Ok(StudentSync {
                    created: false,
                    updated: true,
                    user_id,
                })
            }
        }
    }

    /// Idempotently upsert one classroom for the owning teacher
    ///
    /// Membership is the union of what the store already has and the
    /// newly mapped ids; sync never removes a student. Emails absent
    /// from `student_ids_by_email` failed their own reconciliation
    /// and are dropped here without retry.
    pub async fn sync_classroom(
        &self,
        teacher_id: &str,
        extracted: &ExtractedClassroom,
        student_ids_by_email: &HashMap<String, String>,
    ) -> EngineResult<ClassroomSync> {
        let mapped_ids: Vec<String> = extracted
            .student_emails
            .iter()
            .filter_map(|email| student_ids_by_email.get(email).cloned())
            .collect();

        let mut filter = Document::new();
        filter.insert("teacherId".to_string(), json!(teacher_id));
        filter.insert("courseCode".to_string(), json!(extracted.course_code));

        match self.store.find_one(CLASSROOMS, filter).await? {
            None => {
                let classroom = Classroom {
                    name: extracted.name.clone(),
                    course_code: extracted.course_code.clone(),
                    teacher_id: teacher_id.to_string(),
                    student_ids: mapped_ids,
                    is_active: true,
                };
                let classroom_id = self.store.insert(CLASSROOMS, model::to_document(&classroom)?).await?;
                debug!(course_code = %extracted.course_code, %classroom_id, "created classroom");
                Ok(ClassroomSync {
                    created: true,
                    updated: false,
                    classroom_id,
                })
            }
            Some((classroom_id, fields)) => {
                let existing: Classroom = model::from_document(fields)?;
                let merged = union_ordered(existing.student_ids, mapped_ids);

                let mut fields = Document::new();
                fields.insert("studentIds".to_string(), json!(merged));
                // A previously archived classroom that reappears in
                // the spreadsheet is treated as reactivated.
                fields.insert("isActive".to_string(), json!(true));
                self.store.update(CLASSROOMS, &classroom_id, fields).await?;
                debug!(course_code = %extracted.course_code, %classroom_id, "merged classroom membership");
                Ok(ClassroomSync {
                    created: false,
                    updated: true,
                    classroom_id,
                })
            }
        }
    }
}

/// Order-preserving, duplicate-free union of two id lists
fn union_ordered(existing: Vec<String>, incoming: Vec<String>) -> Vec<String> {
    let mut merged = existing;
    for id in incoming {
        if !merged.contains(&id) {
            merged.push(id);
        }
    }
    merged
}
