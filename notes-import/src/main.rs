//! notes-import - plain text note importer
//!
//! Imports the given text and markdown files and prints each resulting note
//! as one JSON line on stdout, followed by the batch report.

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use notes_common::events::NoteEvent;
use notes_import::{
    CompletionPolicy, FileCandidate, ImportConfig, ImportOptions, NoteDraft, NoteSink,
    TextFileImporter, TracingAnalytics,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "notes-import", version, about = "Import text files as notes")]
struct Args {
    /// Files to import
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "NOTES_IMPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Completion policy: all_resolved or sentinel
    #[arg(long)]
    policy: Option<CompletionPolicy>,
}

/// Writes each note to stdout as a JSON line
struct StdoutSink {
    out: Mutex<std::io::Stdout>,
}

#[async_trait]
impl NoteSink for StdoutSink {
    async fn add_note(&self, draft: NoteDraft, _options: &ImportOptions) -> anyhow::Result<()> {
        let line = serde_json::to_string(&draft)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow::anyhow!("stdout lock poisoned"))?;
        writeln!(out, "{}", line)?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ImportConfig::resolve(args.config.as_deref())?;
    if let Some(policy) = args.policy {
        config.completion_policy = policy;
    }

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting notes-import {}", env!("CARGO_PKG_VERSION"));

    let mut candidates = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match FileCandidate::from_path(path).await {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    let sink = Arc::new(StdoutSink {
        out: Mutex::new(std::io::stdout()),
    });
    let importer = Arc::new(TextFileImporter::new(
        sink,
        ImportOptions::default(),
        Arc::new(TracingAnalytics),
        config,
    )?);

    let mut events = importer.subscribe();
    let status_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(NoteEvent::ImportFileFailed {
                    file_name,
                    error_message,
                    ..
                }) => warn!("{}: {}", file_name, error_message),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!("Status logger fell behind, {} events dropped", missed)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let report = importer.spawn_import(Some(candidates)).await??;
    drop(importer);
    if let Err(e) = status_task.await {
        warn!("Status logger task failed: {}", e);
    }

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
