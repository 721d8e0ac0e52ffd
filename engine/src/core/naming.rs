//! Classroom naming strategies
//!
//! The display name of a synced classroom is derived from its course
//! code and the first assignment title seen for that course. The
//! legacy heuristic (first word of the title) is kept as the default
//! strategy, but it is a heuristic, not a contract, so it lives
//! behind a trait.

/// Strategy for deriving a classroom's display name
pub trait ClassroomNaming: Send + Sync {
    /// Derive a name from the course code and the first assignment
    /// title seen for that course. `title` may be blank.
    fn classroom_name(&self, course_code: &str, title: &str) -> String;
}

/// Default strategy: `"{courseCode} - {firstWordOfTitle}"`
///
/// Falls back to the bare course code when the title has no usable
/// first word.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignmentPrefixNaming;

impl ClassroomNaming for AssignmentPrefixNaming {
    fn classroom_name(&self, course_code: &str, title: &str) -> String {
        match title.split_whitespace().next() {
            Some(word) => format!("{course_code} - {word}"),
            None => course_code.to_string(),
        }
    }
}
