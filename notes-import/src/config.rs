//! Configuration resolution for notes-import
//!
//! Provides multi-tier configuration resolution with ENV → TOML → default priority.

use crate::error::{ImportError, ImportResult};
use notes_common::config::{env_override, find_config_file, load_toml_or_default};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Application name used for config file discovery
pub const APP_NAME: &str = "notes-import";

/// Largest file (in bytes) the importer will read
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Extensions recognised as plain text
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md"];

pub const DEFAULT_MAX_CONCURRENT_READS: usize = 16;

pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

pub const ENV_MAX_FILE_SIZE: &str = "NOTES_IMPORT_MAX_FILE_SIZE";
pub const ENV_MAX_CONCURRENT_READS: &str = "NOTES_IMPORT_MAX_CONCURRENT_READS";
pub const ENV_COMPLETION_POLICY: &str = "NOTES_IMPORT_COMPLETION_POLICY";

/// How the importer decides a batch is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Complete once every dispatched read has resolved (success, skip or failure)
    #[default]
    AllResolved,
    /// Complete when the last file of the collection, matched by name, imports
    ///
    /// Kept for compatibility with callers that depend on the old signal.
    /// Completion may never fire (skipped or failed last file) or fire more
    /// than once (several files sharing the last file's name).
    Sentinel,
}

impl CompletionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionPolicy::AllResolved => "all_resolved",
            CompletionPolicy::Sentinel => "sentinel",
        }
    }
}

impl fmt::Display for CompletionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompletionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all_resolved" => Ok(CompletionPolicy::AllResolved),
            "sentinel" => Ok(CompletionPolicy::Sentinel),
            other => Err(format!(
                "unknown completion policy '{}' (expected all_resolved or sentinel)",
                other
            )),
        }
    }
}

/// Importer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Recognised extensions, compared case-insensitively without the dot
    pub allowed_extensions: Vec<String>,
    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Upper bound on reads in flight at once
    pub max_concurrent_reads: usize,
    pub completion_policy: CompletionPolicy,
    /// Status channel buffer size; a subscriber further behind than this lags
    pub event_capacity: usize,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
            completion_policy: CompletionPolicy::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            log_level: "info".to_string(),
        }
    }
}

impl ImportConfig {
    /// Resolve configuration from all tiers
    ///
    /// **Priority:** ENV → TOML → compiled default
    ///
    /// `toml_path` overrides config file discovery. A missing file falls
    /// back to defaults; a malformed one is an error.
    pub fn resolve(toml_path: Option<&Path>) -> ImportResult<Self> {
        let discovered = match toml_path {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(APP_NAME),
        };

        let mut config = match discovered {
            Some(path) => {
                info!("Loading importer config from {}", path.display());
                load_toml_or_default::<ImportConfig>(&path)?
            }
            None => {
                info!("No importer config file found, using defaults");
                ImportConfig::default()
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the current values
    pub fn apply_env_overrides(&mut self) -> ImportResult<()> {
        if let Some(size) = env_override::<u64>(ENV_MAX_FILE_SIZE)? {
            info!("max_file_size overridden from environment: {}", size);
            self.max_file_size = size;
        }

        if let Some(reads) = env_override::<usize>(ENV_MAX_CONCURRENT_READS)? {
            info!("max_concurrent_reads overridden from environment: {}", reads);
            self.max_concurrent_reads = reads;
        }

        if let Some(policy) = env_override::<CompletionPolicy>(ENV_COMPLETION_POLICY)? {
            info!("completion_policy overridden from environment: {}", policy);
            self.completion_policy = policy;
        }

        Ok(())
    }

    /// Reject settings the importer cannot run with
    pub fn validate(&self) -> ImportResult<()> {
        if self.max_concurrent_reads == 0 {
            return Err(ImportError::Config(
                "max_concurrent_reads must be at least 1".to_string(),
            ));
        }

        if self.event_capacity == 0 {
            return Err(ImportError::Config(
                "event_capacity must be at least 1".to_string(),
            ));
        }

        if self
            .allowed_extensions
            .iter()
            .all(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            return Err(ImportError::Config(
                "allowed_extensions must name at least one extension".to_string(),
            ));
        }

        Ok(())
    }
}
