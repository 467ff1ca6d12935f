//! Candidate files supplied by the caller

use crate::error::{ImportError, ImportResult};
use notes_common::time::system_time_to_millis;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a candidate's bytes live
#[derive(Debug, Clone)]
pub enum FileSource {
    /// File on the local filesystem
    Path(PathBuf),
    /// Bytes already held in memory (e.g. an upload)
    Memory(Arc<[u8]>),
}

/// A file offered for import
///
/// Owned by the caller; the importer only reads it.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    /// File name including extension, without directories
    pub name: String,
    /// Size in bytes as reported by the caller
    pub size: u64,
    /// Last modification time, milliseconds since the Unix epoch
    pub last_modified_ms: i64,
    /// Content accessor
    pub source: FileSource,
}

impl FileCandidate {
    /// Create a candidate whose content is held in memory
    pub fn in_memory(
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        last_modified_ms: i64,
    ) -> Self {
        let bytes: Arc<[u8]> = Arc::from(content.into());
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            last_modified_ms,
            source: FileSource::Memory(bytes),
        }
    }

    /// Create a candidate from a file on disk
    ///
    /// Name, size and modification time come from filesystem metadata.
    pub async fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| ImportError::Read {
                file_name: name.clone(),
                source,
            })?;

        let last_modified_ms = metadata
            .modified()
            .map(system_time_to_millis)
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            last_modified_ms,
            source: FileSource::Path(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_size_matches_content() {
        let file = FileCandidate::in_memory("a.txt", "hello", 1_000);
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.size, 5);
        assert_eq!(file.last_modified_ms, 1_000);
        assert!(matches!(file.source, FileSource::Memory(_)));
    }

    #[tokio::test]
    async fn test_from_path_reads_metadata() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("Groceries.md");
        std::fs::write(&path, "milk\neggs\n").unwrap();

        let file = FileCandidate::from_path(&path).await.unwrap();
        assert_eq!(file.name, "Groceries.md");
        assert_eq!(file.size, 10);
        assert!(file.last_modified_ms > 0);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = FileCandidate::from_path("/nonexistent/notes/missing.txt").await;
        match result {
            Err(ImportError::Read { file_name, .. }) => assert_eq!(file_name, "missing.txt"),
            other => panic!("Expected Read error, got {:?}", other),
        }
    }
}
