//! Text file eligibility filter
//!
//! A file is eligible when its name ends in a recognised text extension
//! (case-insensitive) and its size does not exceed the configured ceiling.
//! The predicate is pure: filtering an already filtered set changes nothing.

use crate::config::ImportConfig;
use crate::models::FileCandidate;

/// Outcome of the eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Extension not in the recognised set
    WrongExtension,
    /// Larger than the size ceiling
    TooLarge,
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Text file filter
#[derive(Debug, Clone)]
pub struct FileFilter {
    /// Lowercase suffixes including the leading dot, e.g. ".md"
    suffixes: Vec<String>,
    max_file_size: u64,
}

impl FileFilter {
    pub fn new<I, S>(extensions: I, max_file_size: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();

        Self {
            suffixes,
            max_file_size,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(&config.allowed_extensions, config.max_file_size)
    }

    /// Classify a candidate
    pub fn check(&self, file: &FileCandidate) -> Eligibility {
        if !self.has_text_extension(&file.name) {
            return Eligibility::WrongExtension;
        }

        if file.size > self.max_file_size {
            return Eligibility::TooLarge;
        }

        Eligibility::Eligible
    }

    pub fn is_eligible(&self, file: &FileCandidate) -> bool {
        self.check(file).is_eligible()
    }

    fn has_text_extension(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix.as_str()))
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::from_config(&ImportConfig::default())
    }
}
