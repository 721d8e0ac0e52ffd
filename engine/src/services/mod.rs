//! Real service implementations for the collaborator traits

pub mod memory;
pub mod sheets;

pub use memory::MemoryDatastore;
pub use sheets::SheetsSubmissionSource;
