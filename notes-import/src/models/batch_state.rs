//! Batch state machine
//!
//! A batch progresses through: IDLE → RUNNING → COMPLETED,
//! or IDLE → ERROR when no files were supplied.

use crate::config::CompletionPolicy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Batch workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImportState {
    /// Created, nothing dispatched yet
    Idle,
    /// Reads dispatched, waiting for resolutions
    Running,
    /// Completion reported
    Completed,
    /// No input; batch never started
    Error,
}

/// Per-invocation counters for one batch
///
/// Owned by a single task for the lifetime of one `import_notes` call and
/// discarded when it returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchState {
    /// Unique batch identifier
    pub batch_id: Uuid,

    /// Current workflow state
    pub state: ImportState,

    /// Notes handed to the note sink so far
    pub imported_count: usize,

    /// Name of the last file of the collection (completion sentinel)
    pub expected_last_file_name: Option<String>,

    /// Eligible files dispatched for reading
    pub dispatched: usize,

    /// Dispatched files whose read has resolved, whatever the outcome
    pub resolved: usize,

    /// Files skipped (ineligible, or empty after normalization)
    pub skipped: usize,

    /// Files whose read or sink call failed
    pub failed: usize,

    /// Number of completion signals raised
    pub completion_events: usize,

    /// Batch start time
    pub started_at: DateTime<Utc>,

    /// Batch end time (set on COMPLETED or ERROR)
    pub ended_at: Option<DateTime<Utc>>,
}

impl BatchState {
    pub fn new() -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            state: ImportState::Idle,
            imported_count: 0,
            expected_last_file_name: None,
            dispatched: 0,
            resolved: 0,
            skipped: 0,
            failed: 0,
            completion_events: 0,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Transition to new state, returning the previous one
    pub fn transition_to(&mut self, new_state: ImportState) -> ImportState {
        let old_state = self.state;
        self.state = new_state;

        if self.is_terminal() && self.ended_at.is_none() {
            self.ended_at = Some(Utc::now());
        }

        old_state
    }

    /// Check if batch reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, ImportState::Completed | ImportState::Error)
    }

    /// Dispatched reads that have not resolved yet
    pub fn outstanding(&self) -> usize {
        self.dispatched.saturating_sub(self.resolved)
    }

    /// Summarize the batch for the caller
    pub fn report(&self, policy: CompletionPolicy) -> BatchReport {
        let elapsed_ms = (Utc::now() - self.started_at).num_milliseconds().max(0) as u64;
        BatchReport {
            batch_id: self.batch_id,
            state: self.state,
            policy,
            imported_count: self.imported_count,
            dispatched: self.dispatched,
            skipped: self.skipped,
            failed: self.failed,
            completion_events: self.completion_events,
            elapsed_ms,
        }
    }
}

impl Default for BatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// Final summary returned by `import_notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub state: ImportState,
    pub policy: CompletionPolicy,
    pub imported_count: usize,
    pub dispatched: usize,
    pub skipped: usize,
    pub failed: usize,
    pub completion_events: usize,
    pub elapsed_ms: u64,
}
