//! Test helpers for importer integration tests
//!
//! Recording sinks, a scripted file reader and event collection.

#![allow(dead_code)]

use async_trait::async_trait;
use notes_common::events::{ImportStatusKind, NoteEvent};
use notes_import::{
    AnalyticsSink, FileCandidate, FileReader, ImportConfig, ImportError, ImportOptions,
    ImportResult, NoteDraft, NoteSink, TextFileImporter,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

/// Note sink that records every draft and the options it was given
#[derive(Default)]
pub struct RecordingSink {
    notes: Mutex<Vec<(NoteDraft, ImportOptions)>>,
    failing_titles: HashSet<String>,
}

impl RecordingSink {
    /// Sink that rejects notes whose content starts with any of `titles`
    pub fn failing_for(titles: &[&str]) -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            failing_titles: titles.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn drafts(&self) -> Vec<NoteDraft> {
        self.notes.lock().unwrap().iter().map(|(d, _)| d.clone()).collect()
    }

    pub fn options(&self) -> Vec<ImportOptions> {
        self.notes.lock().unwrap().iter().map(|(_, o)| o.clone()).collect()
    }

    pub fn contents(&self) -> Vec<String> {
        self.drafts().into_iter().map(|d| d.content).collect()
    }
}

#[async_trait]
impl NoteSink for RecordingSink {
    async fn add_note(&self, draft: NoteDraft, options: &ImportOptions) -> anyhow::Result<()> {
        if self
            .failing_titles
            .iter()
            .any(|title| draft.content.starts_with(title.as_str()))
        {
            anyhow::bail!("storage rejected note");
        }
        self.notes.lock().unwrap().push((draft, options.clone()));
        Ok(())
    }
}

/// Analytics sink that records every event
#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn record_event(&self, event_name: &str, properties: Value) {
        self.events
            .lock()
            .unwrap()
            .push((event_name.to_string(), properties));
    }
}

/// Scripted behavior of one file read
#[derive(Debug, Clone)]
pub enum ReadScript {
    /// Resolve with the file's content after the delay
    Delayed(Duration),
    /// Fail with a permission error
    Fail,
    /// Never resolve
    Stall,
}

/// File reader driven by a per-name script
///
/// Files without a script resolve immediately with their in-memory content.
/// Tracks the peak number of reads in flight.
#[derive(Default)]
pub struct ScriptedReader {
    scripts: HashMap<String, ReadScript>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    default_delay: Option<Duration>,
}

impl ScriptedReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, name: &str, script: ReadScript) -> Self {
        self.scripts.insert(name.to_string(), script);
        self
    }

    /// Delay applied to files without a script
    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileReader for ScriptedReader {
    async fn read_text(&self, file: &FileCandidate) -> ImportResult<String> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let script = self.scripts.get(&file.name).cloned();
        let delay = match script {
            Some(ReadScript::Delayed(delay)) => Some(delay),
            Some(ReadScript::Fail) => {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                return Err(ImportError::Read {
                    file_name: file.name.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Some(ReadScript::Stall) => {
                futures::future::pending::<()>().await;
                None
            }
            None => self.default_delay,
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let text = notes_import::LocalFileReader::new().read_text(file).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        text
    }
}

/// Importer wired to recording sinks
pub struct Harness {
    pub importer: TextFileImporter,
    pub sink: Arc<RecordingSink>,
    pub analytics: Arc<RecordingAnalytics>,
    pub events: broadcast::Receiver<NoteEvent>,
}

impl Harness {
    pub fn new(config: ImportConfig) -> Self {
        Self::with_sink(config, RecordingSink::default())
    }

    pub fn with_sink(config: ImportConfig, sink: RecordingSink) -> Self {
        Self::build(config, sink, ImportOptions::default(), None)
    }

    pub fn build(
        config: ImportConfig,
        sink: RecordingSink,
        options: ImportOptions,
        reader: Option<Arc<dyn FileReader>>,
    ) -> Self {
        let sink = Arc::new(sink);
        let analytics = Arc::new(RecordingAnalytics::default());
        let mut importer = TextFileImporter::new(
            Arc::clone(&sink) as Arc<dyn NoteSink>,
            options,
            Arc::clone(&analytics) as Arc<dyn AnalyticsSink>,
            config,
        )
        .expect("valid config");

        if let Some(reader) = reader {
            importer = importer.with_reader(reader);
        }

        let events = importer.subscribe();
        Self {
            importer,
            sink,
            analytics,
            events,
        }
    }

    /// Drain every event emitted so far
    pub fn drain_events(&mut self) -> Vec<NoteEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }
}

/// Status kinds of a sequence of events
pub fn kinds(events: &[NoteEvent]) -> Vec<ImportStatusKind> {
    events.iter().map(|e| e.status_kind()).collect()
}

/// Imported counts carried by progress and completion events, in order
pub fn counts(events: &[NoteEvent]) -> Vec<usize> {
    events.iter().filter_map(|e| e.imported_count()).collect()
}

/// In-memory text file with a fixed modification time
pub fn text_file(name: &str, content: &str) -> FileCandidate {
    FileCandidate::in_memory(name, content, 1_700_000_000_000)
}

pub fn sentinel_config() -> ImportConfig {
    ImportConfig {
        completion_policy: notes_import::CompletionPolicy::Sentinel,
        ..Default::default()
    }
}
