//! Batch status reporting over the event bus
//!
//! Fire-and-forget: events go out whether or not anyone subscribed.

use notes_common::events::{EventBus, NoteEvent};
use notes_common::time::now;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Status emitter bound to one batch
#[derive(Clone)]
pub struct StatusEmitter {
    event_bus: EventBus,
    batch_id: Uuid,
}

impl StatusEmitter {
    pub fn new(event_bus: EventBus, batch_id: Uuid) -> Self {
        Self {
            event_bus,
            batch_id,
        }
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(batch_id = %self.batch_id, "Import error: {}", message);
        self.event_bus.emit_lossy(NoteEvent::ImportError {
            batch_id: self.batch_id,
            message,
            timestamp: now(),
        });
    }

    pub fn progress(&self, imported_count: usize) {
        debug!(batch_id = %self.batch_id, imported_count, "Import progress");
        self.event_bus.emit_lossy(NoteEvent::ImportProgress {
            batch_id: self.batch_id,
            imported_count,
            timestamp: now(),
        });
    }

    pub fn complete(&self, imported_count: usize) {
        info!(batch_id = %self.batch_id, imported_count, "Import complete");
        self.event_bus.emit_lossy(NoteEvent::ImportComplete {
            batch_id: self.batch_id,
            imported_count,
            timestamp: now(),
        });
    }

    pub fn file_failed(&self, file_name: &str, error_message: impl Into<String>) {
        self.event_bus.emit_lossy(NoteEvent::ImportFileFailed {
            batch_id: self.batch_id,
            file_name: file_name.to_string(),
            error_message: error_message.into(),
            timestamp: now(),
        });
    }
}
