//! Event types for the note import event system
//!
//! Provides shared event definitions and EventBus for status reporting.

mod import_types;

pub use import_types::ImportStatusKind;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Note import event types
///
/// Events are broadcast via EventBus and can be serialized for transmission
/// to any front end. Every event carries the batch it belongs to so a
/// subscriber can follow one batch among several.
///
/// Delivery order follows read completion order, not file submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NoteEvent {
    /// Batch could not start (no files supplied)
    ///
    /// Never followed by progress or completion for the same batch.
    ImportError {
        /// Batch UUID
        batch_id: Uuid,
        /// Human readable reason
        message: String,
        /// When the error was raised
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// One more note was handed to the note sink
    ImportProgress {
        /// Batch UUID
        batch_id: Uuid,
        /// Notes imported so far in this batch
        imported_count: usize,
        /// When the note was imported
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Batch finished
    ///
    /// Triggers:
    /// - Caller: close progress display
    /// - Analytics: record batch completion
    ImportComplete {
        /// Batch UUID
        batch_id: Uuid,
        /// Final number of notes imported
        imported_count: usize,
        /// When the batch completed
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A single file failed to read or could not be stored
    ImportFileFailed {
        /// Batch UUID
        batch_id: Uuid,
        /// Name of the failing file
        file_name: String,
        /// Error details
        error_message: String,
        /// When the failure was observed
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl NoteEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &str {
        match self {
            NoteEvent::ImportError { .. } => "ImportError",
            NoteEvent::ImportProgress { .. } => "ImportProgress",
            NoteEvent::ImportComplete { .. } => "ImportComplete",
            NoteEvent::ImportFileFailed { .. } => "ImportFileFailed",
        }
    }

    /// Status kind carried by this event
    pub fn status_kind(&self) -> ImportStatusKind {
        match self {
            NoteEvent::ImportError { .. } => ImportStatusKind::Error,
            NoteEvent::ImportProgress { .. } => ImportStatusKind::Progress,
            NoteEvent::ImportComplete { .. } => ImportStatusKind::Complete,
            NoteEvent::ImportFileFailed { .. } => ImportStatusKind::FileFailed,
        }
    }

    /// Batch this event belongs to
    pub fn batch_id(&self) -> Uuid {
        match self {
            NoteEvent::ImportError { batch_id, .. }
            | NoteEvent::ImportProgress { batch_id, .. }
            | NoteEvent::ImportComplete { batch_id, .. }
            | NoteEvent::ImportFileFailed { batch_id, .. } => *batch_id,
        }
    }

    /// Imported count for progress and completion events
    pub fn imported_count(&self) -> Option<usize> {
        match self {
            NoteEvent::ImportProgress { imported_count, .. }
            | NoteEvent::ImportComplete { imported_count, .. } => Some(*imported_count),
            _ => None,
        }
    }
}

// ========================================
// EventBus Implementation
// ========================================

/// Central event distribution bus
///
/// The EventBus uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use notes_common::events::{EventBus, NoteEvent};
/// use uuid::Uuid;
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit(NoteEvent::ImportProgress {
///     batch_id: Uuid::new_v4(),
///     imported_count: 1,
///     timestamp: chrono::Utc::now(),
/// }).ok();
///
/// assert_eq!(rx.try_recv().unwrap().event_type(), "ImportProgress");
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NoteEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events.
    ///   Must be greater than zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<NoteEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: NoteEvent,
    ) -> Result<usize, broadcast::error::SendError<NoteEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// Status reporting is fire-and-forget: an importer with nobody
    /// subscribed keeps working.
    pub fn emit_lossy(&self, event: NoteEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
