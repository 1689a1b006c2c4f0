//! Event types and the in-process event bus
//!
//! Mutations publish a [`FiestaEvent`] so that connected views (SSE clients)
//! know their copy of the roster, announcement or high score is stale. Events
//! carry no payload beyond their kind; clients re-fetch what they display.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Change notifications published after successful writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FiestaEvent {
    /// Roster entries were added, toggled or cleared
    RosterChanged,
    /// Announcement text was set or removed
    AnnouncementChanged,
    /// High score record or game counter changed
    HighScoreChanged,
}

impl FiestaEvent {
    /// SSE event name for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            FiestaEvent::RosterChanged => "RosterChanged",
            FiestaEvent::AnnouncementChanged => "AnnouncementChanged",
            FiestaEvent::HighScoreChanged => "HighScoreChanged",
        }
    }
}

/// Broadcast bus for [`FiestaEvent`]s
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<FiestaEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<FiestaEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: FiestaEvent) {
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

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
