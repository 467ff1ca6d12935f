//! Text file batch importer
//!
//! Coordinates one batch: filter → concurrent reads → normalize → note sink
//! → completion tracking → status events.
//!
//! # Concurrency
//! Reads run concurrently through `futures::stream::buffer_unordered`, capped
//! at `max_concurrent_reads`. Everything after a read resolves (normalize,
//! sink call, counter update, status event) runs on the task driving the
//! batch, one file at a time, so the batch counters never interleave.
//!
//! The driving task yields after each status update so subscribers on the
//! same runtime get to drain the channel. A subscriber that still falls more
//! than `event_capacity` events behind receives `RecvError::Lagged` and
//! misses the overwritten events.
//!
//! There is no cancellation: once dispatched, every read runs to completion
//! or failure. Reads have no timeout; a stalled read keeps the batch open.

use crate::config::ImportConfig;
use crate::error::{ImportError, ImportResult};
use crate::models::{BatchReport, FileCandidate, ImportOptions};
use crate::services::completion_tracker::{CompletionTracker, TrackerSignal};
use crate::services::content_normalizer::normalize;
use crate::services::file_filter::{Eligibility, FileFilter};
use crate::services::file_reader::{FileReader, LocalFileReader};
use crate::services::sinks::{completion_properties, AnalyticsSink, NoteSink, IMPORT_COMPLETED_EVENT};
use crate::services::status_emitter::StatusEmitter;
use futures::stream::{self, StreamExt};
use notes_common::events::{EventBus, NoteEvent};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Imports plain-text and markdown files as notes
///
/// One importer may run several batches over its lifetime; each call to
/// [`import_notes`](Self::import_notes) gets its own batch state and id.
pub struct TextFileImporter {
    note_sink: Arc<dyn NoteSink>,
    options: ImportOptions,
    analytics: Arc<dyn AnalyticsSink>,
    reader: Arc<dyn FileReader>,
    filter: FileFilter,
    config: ImportConfig,
    event_bus: EventBus,
}

impl TextFileImporter {
    /// Create new importer
    ///
    /// # Arguments
    /// * `note_sink` - Receives every imported note
    /// * `options` - Forwarded unchanged with every note
    /// * `analytics` - Receives the batch completion event
    /// * `config` - Filter limits, concurrency and completion policy
    pub fn new(
        note_sink: Arc<dyn NoteSink>,
        options: ImportOptions,
        analytics: Arc<dyn AnalyticsSink>,
        config: ImportConfig,
    ) -> ImportResult<Self> {
        config.validate()?;

        Ok(Self {
            note_sink,
            options,
            analytics,
            reader: Arc::new(LocalFileReader::new()),
            filter: FileFilter::from_config(&config),
            event_bus: EventBus::new(config.event_capacity),
            config,
        })
    }

    /// Replace the file reader
    pub fn with_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Subscribe to status events for all future batches
    ///
    /// A receiver that falls more than `event_capacity` events behind gets
    /// `RecvError::Lagged` and loses the oldest events.
    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.event_bus.subscribe()
    }

    /// Run the batch on the tokio runtime without waiting for it
    pub fn spawn_import(
        self: &Arc<Self>,
        files: Option<Vec<FileCandidate>>,
    ) -> JoinHandle<ImportResult<BatchReport>> {
        let importer = Arc::clone(self);
        tokio::spawn(async move { importer.import_notes(files).await })
    }

    /// Import a collection of files
    ///
    /// `None` or an empty collection emits one error status and returns
    /// [`ImportError::MissingInput`]. Otherwise every eligible file is read,
    /// normalized and handed to the note sink; the call returns once all
    /// dispatched reads have resolved.
    pub async fn import_notes(
        &self,
        files: Option<Vec<FileCandidate>>,
    ) -> ImportResult<BatchReport> {
        let mut tracker = CompletionTracker::new(self.config.completion_policy);
        let status = StatusEmitter::new(self.event_bus.clone(), tracker.batch().batch_id);

        let files = match files {
            Some(files) if !files.is_empty() => files,
            _ => {
                tracker.fail_missing_input();
                status.error(ImportError::MissingInput.to_string());
                return Err(ImportError::MissingInput);
            }
        };

        let total = files.len();
        let last_file_name = files
            .last()
            .map(|file| file.name.clone())
            .unwrap_or_default();

        let mut eligible = Vec::with_capacity(total);
        let mut ineligible = 0usize;
        for file in files {
            match self.filter.check(&file) {
                Eligibility::Eligible => eligible.push(file),
                reason => {
                    debug!(
                        batch_id = %status.batch_id(),
                        file = %file.name,
                        size = file.size,
                        ?reason,
                        "Skipping ineligible file"
                    );
                    ineligible += 1;
                }
            }
        }

        info!(
            batch_id = %status.batch_id(),
            total,
            eligible = eligible.len(),
            policy = %self.config.completion_policy,
            "Starting text file import"
        );

        let signal = tracker.begin(&last_file_name, eligible.len(), ineligible);
        self.deliver(signal, &status);

        let reader = Arc::clone(&self.reader);
        let mut reads = stream::iter(eligible)
            .map(|file| {
                let reader = Arc::clone(&reader);
                async move {
                    let result = reader.read_text(&file).await;
                    (file, result)
                }
            })
            .buffer_unordered(self.config.max_concurrent_reads);

        while let Some((file, result)) = reads.next().await {
            let signal = match result {
                Ok(raw) => self.import_file(&file, raw, &mut tracker, &status).await,
                Err(e) => Self::fail_file(&file, &e, &mut tracker, &status),
            };
            self.deliver(signal, &status);
            tokio::task::yield_now().await;
        }

        let report = tracker.report();
        info!(
            batch_id = %report.batch_id,
            state = ?report.state,
            imported = report.imported_count,
            skipped = report.skipped,
            failed = report.failed,
            elapsed_ms = report.elapsed_ms,
            "Text file import finished"
        );

        Ok(report)
    }

    /// Normalize one file's content and store it
    async fn import_file(
        &self,
        file: &FileCandidate,
        raw: String,
        tracker: &mut CompletionTracker,
        status: &StatusEmitter,
    ) -> TrackerSignal {
        let Some(draft) = normalize(raw, &file.name, file.last_modified_ms) else {
            return tracker.record_empty(&file.name);
        };

        match self.note_sink.add_note(draft, &self.options).await {
            Ok(()) => tracker.record_imported(&file.name),
            Err(e) => {
                let error = ImportError::Sink {
                    file_name: file.name.clone(),
                    message: format!("{:#}", e),
                };
                Self::fail_file(file, &error, tracker, status)
            }
        }
    }

    fn fail_file(
        file: &FileCandidate,
        error: &ImportError,
        tracker: &mut CompletionTracker,
        status: &StatusEmitter,
    ) -> TrackerSignal {
        warn!(
            batch_id = %status.batch_id(),
            file = %file.name,
            error = %error,
            "File import failed"
        );
        status.file_failed(&file.name, error.to_string());
        tracker.record_failed(&file.name)
    }

    fn deliver(&self, signal: TrackerSignal, status: &StatusEmitter) {
        match signal {
            TrackerSignal::Progress(count) => status.progress(count),
            TrackerSignal::Complete(count) => {
                status.complete(count);
                self.analytics
                    .record_event(IMPORT_COMPLETED_EVENT, completion_properties(count));
            }
            TrackerSignal::Silent => {}
        }
    }
}
