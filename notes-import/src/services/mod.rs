//! Importer services

pub mod batch_importer;
pub mod completion_tracker;
pub mod content_normalizer;
pub mod file_filter;
pub mod file_reader;
pub mod sinks;
pub mod status_emitter;

pub use batch_importer::TextFileImporter;
pub use completion_tracker::{CompletionTracker, TrackerSignal};
pub use content_normalizer::{file_title, normalize};
pub use file_filter::{Eligibility, FileFilter};
pub use file_reader::{FileReader, LocalFileReader};
pub use sinks::{AnalyticsSink, NoteSink, TracingAnalytics};
pub use status_emitter::StatusEmitter;
