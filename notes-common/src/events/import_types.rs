//! Import status type definitions
//!
//! Supporting types for batch import status reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of status carried by an import event
///
/// The first three kinds are the status vocabulary callers subscribe to;
/// `FileFailed` reports a single file that could not be read or stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatusKind {
    /// Batch could not start
    Error,
    /// A note was imported; carries the running count
    Progress,
    /// Batch finished; carries the final count
    Complete,
    /// One file failed to read or store
    FileFailed,
}

impl ImportStatusKind {
    /// Wire name of the status kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatusKind::Error => "error",
            ImportStatusKind::Progress => "progress",
            ImportStatusKind::Complete => "complete",
            ImportStatusKind::FileFailed => "file_failed",
        }
    }

    /// Whether this kind ends the batch from the caller's point of view
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStatusKind::Error | ImportStatusKind::Complete)
    }
}

impl fmt::Display for ImportStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
