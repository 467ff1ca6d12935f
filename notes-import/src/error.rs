//! Error types for notes-import
//!
//! Skipped files (wrong extension, oversize, empty content) are not errors
//! and never appear here.

use thiserror::Error;

/// Importer error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// No file collection supplied; the batch never starts
    #[error("No files to import.")]
    MissingInput,

    /// A file's content could not be read
    #[error("Failed to read {file_name}: {source}")]
    Read {
        file_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The note sink rejected a draft
    #[error("Note sink failed for {file_name}: {message}")]
    Sink { file_name: String, message: String },

    /// Invalid importer configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// notes-common error
    #[error("Common error: {0}")]
    Common(#[from] notes_common::Error),
}

/// Result type for importer operations
pub type ImportResult<T> = Result<T, ImportError>;
