//! Unit tests for the extraction pass
//!
//! Extraction is pure, so these tests exercise it directly on record
//! slices without any mocked collaborators.

mod common;
use common::TestFixtures;

use engine::{extract, extract_with_naming, ClassroomNaming};

/// Extraction is deterministic for a fixed input order
#[test]
fn test_extraction_is_deterministic() {
    let records = TestFixtures::scenario_records();

    let first = extract(&records);
    let second = extract(&records);

    assert_eq!(first, second);
}

/// Two courses and two students, one student enrolled in both
#[test]
fn test_scenario_two_courses_shared_student() {
    let extraction = extract(&TestFixtures::scenario_records());

    let courses: Vec<&str> = extraction.classrooms().iter().map(|c| c.course_code.as_str()).collect();
    assert_eq!(courses, vec!["CS101", "MATH201"]);
    assert_eq!(
        extraction.classroom("CS101").unwrap().student_emails,
        vec![TestFixtures::JOHN, TestFixtures::JANE]
    );
    assert_eq!(
        extraction.classroom("MATH201").unwrap().student_emails,
        vec![TestFixtures::JOHN]
    );

    let emails: Vec<&str> = extraction.students().iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, vec![TestFixtures::JOHN, TestFixtures::JANE]);
    assert_eq!(
        extraction.student(TestFixtures::JOHN).unwrap().course_ids,
        vec!["CS101", "MATH201"]
    );
    assert_eq!(extraction.student(TestFixtures::JANE).unwrap().course_ids, vec!["CS101"]);
}

/// A record missing a required field contributes to neither map and
/// produces no error
#[test]
fn test_invalid_record_is_silently_skipped() {
    let records = vec![
        TestFixtures::record("CS101", "Essay One", "John", "Doe", TestFixtures::JOHN),
        TestFixtures::record("", "Essay One", "Ghost", "Row", "ghost@school.edu"),
        TestFixtures::record("CS101", "Essay One", "Jane", "Smith", TestFixtures::JANE),
    ];

    let extraction = extract(&records);

    assert_eq!(extraction.classrooms().len(), 1);
    assert_eq!(extraction.students().len(), 2);
    assert!(extraction.student("ghost@school.edu").is_none());
}

/// Whitespace-only fields count as missing
#[test]
fn test_whitespace_only_fields_are_skipped() {
    let records = vec![
        TestFixtures::record("CS101", "Essay One", "   ", "Doe", TestFixtures::JOHN),
        TestFixtures::record("CS101", "Essay One", "Jane", "Smith", "   "),
    ];

    let extraction = extract(&records);
    assert!(extraction.is_empty());
}

/// Repeated submissions to the same course do not duplicate the
/// student in the classroom nor the course on the student
#[test]
fn test_repeat_submissions_do_not_duplicate() {
    let records = vec![
        TestFixtures::record("CS101", "Essay One", "John", "Doe", TestFixtures::JOHN),
        TestFixtures::record("CS101", "Essay Two", "John", "Doe", TestFixtures::JOHN),
        TestFixtures::record("CS101", "Quiz Three", "John", "Doe", TestFixtures::JOHN),
    ];

    let extraction = extract(&records);

    assert_eq!(
        extraction.classroom("CS101").unwrap().student_emails,
        vec![TestFixtures::JOHN]
    );
    assert_eq!(extraction.student(TestFixtures::JOHN).unwrap().course_ids, vec!["CS101"]);
}

/// Name fields from the last valid record win within one pass
#[test]
fn test_last_write_wins_for_name_fields() {
    let records = vec![
        TestFixtures::record("CS101", "Essay One", "Jon", "Do", TestFixtures::JOHN),
        TestFixtures::record("MATH201", "Problem Set", "John", "Doe", TestFixtures::JOHN),
    ];

    let student = extract(&records).student(TestFixtures::JOHN).unwrap().clone();
    assert_eq!(student.first_name, "John");
    assert_eq!(student.last_name, "Doe");
    assert_eq!(student.display_name, "John Doe");
}

/// The classroom name derives from the first assignment title seen
/// and never changes afterwards
#[test]
fn test_classroom_name_from_first_assignment() {
    let records = vec![
        TestFixtures::record("CS101", "Midterm Review", "John", "Doe", TestFixtures::JOHN),
        TestFixtures::record("CS101", "Final Exam", "Jane", "Smith", TestFixtures::JANE),
    ];

    let extraction = extract(&records);
    assert_eq!(extraction.classroom("CS101").unwrap().name, "CS101 - Midterm");
}

/// A custom naming strategy replaces the default heuristic
#[test]
fn test_custom_naming_strategy() {
    struct CodeOnly;
    impl ClassroomNaming for CodeOnly {
        fn classroom_name(&self, course_code: &str, _title: &str) -> String {
            course_code.to_string()
        }
    }

    let records = TestFixtures::scenario_records();
    let extraction = extract_with_naming(&records, &CodeOnly);
    assert_eq!(extraction.classroom("CS101").unwrap().name, "CS101");
}

/// Empty input yields empty output
#[test]
fn test_empty_input() {
    let extraction = extract(&[]);
    assert!(extraction.is_empty());
    assert_eq!(extraction.classrooms().len(), 0);
    assert_eq!(extraction.students().len(), 0);
}
