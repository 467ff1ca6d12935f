//! notes-import library interface
//!
//! Batch importer that turns plain-text and markdown files into note drafts.
//!
//! # Data flow
//! file collection → [`services::file_filter`] → [`services::file_reader`]
//! (bounded, concurrent) → [`services::content_normalizer`] → [`NoteSink`]
//! → [`services::completion_tracker`] → [`services::status_emitter`]

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::{CompletionPolicy, ImportConfig};
pub use crate::error::{ImportError, ImportResult};
pub use crate::models::{BatchReport, FileCandidate, FileSource, ImportOptions, ImportState, NoteDraft};
pub use crate::services::{
    AnalyticsSink, FileReader, LocalFileReader, NoteSink, TextFileImporter, TracingAnalytics,
};
