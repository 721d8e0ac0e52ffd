//! Core extraction logic and persisted entity shapes

pub mod extract;
pub mod model;
pub mod naming;

pub use extract::{extract, Extraction, ExtractedClassroom, ExtractedStudent};
pub use model::{Classroom, User, CLASSROOMS, USERS};
pub use naming::{AssignmentPrefixNaming, ClassroomNaming};
