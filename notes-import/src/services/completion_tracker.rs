//! Batch completion tracking
//!
//! Decides, after each resolved read, whether the caller should see a
//! progress update, the completion signal, or nothing.
//!
//! # Policies
//! - [`CompletionPolicy::AllResolved`]: completes exactly once, when every
//!   dispatched read has resolved (imported, empty, or failed). A batch with
//!   nothing to dispatch completes immediately with a count of zero.
//! - [`CompletionPolicy::Sentinel`]: completes whenever a file whose name
//!   equals the collection's last file name is imported. If that file is
//!   skipped or fails, completion never fires; if several files share the
//!   name, it fires once per match.
//!
//! The tracker is owned by the single task driving the batch, so its
//! counters need no locking.

use crate::config::CompletionPolicy;
use crate::models::{BatchReport, BatchState, ImportState};
use tracing::debug;

/// What the caller should be told after a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerSignal {
    /// Report the running imported count
    Progress(usize),
    /// Report completion with the final imported count
    Complete(usize),
    /// Report nothing
    Silent,
}

/// Completion state machine for one batch
#[derive(Debug)]
pub struct CompletionTracker {
    policy: CompletionPolicy,
    batch: BatchState,
}

impl CompletionTracker {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            batch: BatchState::new(),
        }
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    pub fn batch(&self) -> &BatchState {
        &self.batch
    }

    pub fn state(&self) -> ImportState {
        self.batch.state
    }

    /// IDLE → ERROR: no files were supplied
    pub fn fail_missing_input(&mut self) {
        self.batch.transition_to(ImportState::Error);
    }

    /// IDLE → RUNNING
    ///
    /// `last_file_name` is the name of the collection's last element,
    /// whatever its eligibility. `dispatched` counts eligible files about to
    /// be read; `ineligible` counts files the filter rejected.
    pub fn begin(&mut self, last_file_name: &str, dispatched: usize, ineligible: usize) -> TrackerSignal {
        self.batch.expected_last_file_name = Some(last_file_name.to_string());
        self.batch.dispatched = dispatched;
        self.batch.skipped = ineligible;
        self.batch.transition_to(ImportState::Running);

        if self.policy == CompletionPolicy::AllResolved && dispatched == 0 {
            return self.complete();
        }

        TrackerSignal::Silent
    }

    /// A note was built from `file_name` and accepted by the note sink
    pub fn record_imported(&mut self, file_name: &str) -> TrackerSignal {
        self.batch.resolved += 1;
        self.batch.imported_count += 1;
        let count = self.batch.imported_count;

        match self.policy {
            CompletionPolicy::Sentinel => {
                if self.is_sentinel(file_name) {
                    self.complete()
                } else {
                    TrackerSignal::Progress(count)
                }
            }
            CompletionPolicy::AllResolved => {
                if self.all_resolved() {
                    self.complete()
                } else {
                    TrackerSignal::Progress(count)
                }
            }
        }
    }

    /// `file_name` normalized to empty content; nothing was imported
    pub fn record_empty(&mut self, file_name: &str) -> TrackerSignal {
        debug!(file = %file_name, "Nothing to import");
        self.batch.resolved += 1;
        self.batch.skipped += 1;
        self.resolve_without_import()
    }

    /// Reading or storing `file_name` failed
    pub fn record_failed(&mut self, file_name: &str) -> TrackerSignal {
        debug!(file = %file_name, "Counting failed file as resolved");
        self.batch.resolved += 1;
        self.batch.failed += 1;
        self.resolve_without_import()
    }

    /// Summarize the batch
    pub fn report(&self) -> BatchReport {
        self.batch.report(self.policy)
    }

    fn resolve_without_import(&mut self) -> TrackerSignal {
        match self.policy {
            CompletionPolicy::Sentinel => TrackerSignal::Silent,
            CompletionPolicy::AllResolved => {
                if self.all_resolved() {
                    self.complete()
                } else {
                    TrackerSignal::Silent
                }
            }
        }
    }

    fn is_sentinel(&self, file_name: &str) -> bool {
        self.batch.expected_last_file_name.as_deref() == Some(file_name)
    }

    fn all_resolved(&self) -> bool {
        self.batch.state == ImportState::Running && self.batch.outstanding() == 0
    }

    fn complete(&mut self) -> TrackerSignal {
        self.batch.transition_to(ImportState::Completed);
        self.batch.completion_events += 1;
        TrackerSignal::Complete(self.batch.imported_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_error_state() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::AllResolved);
        tracker.fail_missing_input();
        assert_eq!(tracker.state(), ImportState::Error);
        assert!(tracker.batch().ended_at.is_some());
    }

    #[test]
    fn test_all_resolved_completes_after_last_resolution() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::AllResolved);
        assert_eq!(tracker.begin("c.txt", 3, 0), TrackerSignal::Silent);

        assert_eq!(tracker.record_imported("c.txt"), TrackerSignal::Progress(1));
        assert_eq!(tracker.record_imported("a.txt"), TrackerSignal::Progress(2));
        assert_eq!(tracker.record_imported("b.txt"), TrackerSignal::Complete(3));
        assert_eq!(tracker.state(), ImportState::Completed);
        assert_eq!(tracker.batch().completion_events, 1);
    }

    #[test]
    fn test_all_resolved_counts_failures_and_empties() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::AllResolved);
        tracker.begin("c.txt", 3, 1);

        assert_eq!(tracker.record_failed("a.txt"), TrackerSignal::Silent);
        assert_eq!(tracker.record_imported("b.txt"), TrackerSignal::Progress(1));
        assert_eq!(tracker.record_empty(".txt"), TrackerSignal::Complete(1));

        let report = tracker.report();
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.imported_count, 1);
    }

    #[test]
    fn test_all_resolved_with_nothing_dispatched_completes_immediately() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::AllResolved);
        assert_eq!(tracker.begin("report.pdf", 0, 1), TrackerSignal::Complete(0));
        assert_eq!(tracker.state(), ImportState::Completed);
    }

    #[test]
    fn test_all_resolved_ignores_duplicate_names() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::AllResolved);
        tracker.begin("dup.txt", 3, 0);

        assert_eq!(tracker.record_imported("dup.txt"), TrackerSignal::Progress(1));
        assert_eq!(tracker.record_imported("dup.txt"), TrackerSignal::Progress(2));
        assert_eq!(tracker.record_imported("dup.txt"), TrackerSignal::Complete(3));
        assert_eq!(tracker.batch().completion_events, 1);
    }

    #[test]
    fn test_sentinel_completes_on_name_match() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::Sentinel);
        tracker.begin("c.txt", 3, 0);

        assert_eq!(tracker.record_imported("c.txt"), TrackerSignal::Complete(1));
        // Late resolutions after the sentinel still report progress
        assert_eq!(tracker.record_imported("a.txt"), TrackerSignal::Progress(2));
        assert_eq!(tracker.record_imported("b.txt"), TrackerSignal::Progress(3));
    }

    #[test]
    fn test_sentinel_never_completes_when_sentinel_is_skipped() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::Sentinel);
        assert_eq!(tracker.begin("report.pdf", 0, 1), TrackerSignal::Silent);
        assert_eq!(tracker.state(), ImportState::Running);

        let mut tracker = CompletionTracker::new(CompletionPolicy::Sentinel);
        tracker.begin(".md", 2, 0);
        assert_eq!(tracker.record_imported("a.txt"), TrackerSignal::Progress(1));
        assert_eq!(tracker.record_empty(".md"), TrackerSignal::Silent);
        assert_eq!(tracker.state(), ImportState::Running);
    }

    #[test]
    fn test_sentinel_fires_per_duplicate_name() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::Sentinel);
        tracker.begin("dup.txt", 2, 0);

        assert_eq!(tracker.record_imported("dup.txt"), TrackerSignal::Complete(1));
        assert_eq!(tracker.record_imported("dup.txt"), TrackerSignal::Complete(2));
        assert_eq!(tracker.batch().completion_events, 2);
    }

    #[test]
    fn test_sentinel_failure_is_silent() {
        let mut tracker = CompletionTracker::new(CompletionPolicy::Sentinel);
        tracker.begin("a.txt", 1, 0);
        assert_eq!(tracker.record_failed("a.txt"), TrackerSignal::Silent);
        assert_eq!(tracker.state(), ImportState::Running);
    }
}
