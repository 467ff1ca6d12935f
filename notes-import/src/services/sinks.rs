//! External collaborators: note storage and analytics
//!
//! The importer only hands payloads to these; storage and event recording
//! belong to the host application.

use crate::models::{ImportOptions, NoteDraft};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

/// Analytics event recorded once per completed batch
pub const IMPORT_COMPLETED_EVENT: &str = "importer_import_completed";

/// Source tag reported with completion analytics
pub const ANALYTICS_SOURCE: &str = "plaintext";

/// Destination for imported notes
#[async_trait]
pub trait NoteSink: Send + Sync {
    /// Store one note; `options` is the importer's options, unchanged
    async fn add_note(&self, draft: NoteDraft, options: &ImportOptions) -> anyhow::Result<()>;
}

/// Destination for analytics events
pub trait AnalyticsSink: Send + Sync {
    fn record_event(&self, event_name: &str, properties: Value);
}

/// Properties payload of the completion analytics event
pub fn completion_properties(note_count: usize) -> Value {
    json!({
        "source": ANALYTICS_SOURCE,
        "note_count": note_count,
    })
}

/// Analytics sink that writes events to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn record_event(&self, event_name: &str, properties: Value) {
        info!(event = event_name, properties = %properties, "Analytics event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_properties_shape() {
        assert_eq!(
            completion_properties(3),
            json!({ "source": "plaintext", "note_count": 3 })
        );
    }
}
