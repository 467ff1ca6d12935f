//! Data models for notes-import

pub mod batch_state;
pub mod file_candidate;
pub mod note_draft;

pub use batch_state::{BatchReport, BatchState, ImportState};
pub use file_candidate::{FileCandidate, FileSource};
pub use note_draft::{ImportOptions, NoteDraft};
