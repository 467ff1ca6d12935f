//! Note payloads handed to the note sink

use serde::{Deserialize, Serialize};

/// Normalized note ready for the note sink
///
/// Both dates are Unix seconds derived from the same file timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub content: String,
    pub creation_date: i64,
    pub modification_date: i64,
}

/// Caller-owned options forwarded unchanged to every note sink call
///
/// The importer never inspects the contents; the shape belongs to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportOptions(pub serde_json::Value);

impl ImportOptions {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self(serde_json::Value::Object(serde_json::Map::new()))
    }
}
