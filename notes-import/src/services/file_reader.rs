//! File content reading
//!
//! The importer reads through the [`FileReader`] trait so hosts can supply
//! their own storage (upload buffers, remote blobs). [`LocalFileReader`]
//! covers the filesystem and in-memory candidates.

use crate::error::{ImportError, ImportResult};
use crate::models::{FileCandidate, FileSource};
use async_trait::async_trait;

/// Non-blocking reader of a candidate's textual content
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Read the whole file as text
    async fn read_text(&self, file: &FileCandidate) -> ImportResult<String>;
}

/// Reads candidates from the local filesystem or memory
///
/// Bytes are decoded as UTF-8; invalid sequences become U+FFFD rather than
/// failing the read. A leading byte order mark is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileReader;

impl LocalFileReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileReader for LocalFileReader {
    async fn read_text(&self, file: &FileCandidate) -> ImportResult<String> {
        let text = match &file.source {
            FileSource::Memory(bytes) => decode_text(bytes.to_vec()),
            FileSource::Path(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| ImportError::Read {
                        file_name: file.name.clone(),
                        source,
                    })?;
                decode_text(bytes)
            }
        };

        Ok(text)
    }
}

fn decode_text(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    match text.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
