//! Event broadcaster for record change events.
//!
//! Uses tokio's broadcast channel for multi-producer, multi-consumer
//! messaging. Slow receivers lose the oldest events once the buffer fills.

use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::RecordEvent;

/// Default buffer size for the broadcast channel.
const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Broadcaster for record events.
///
/// # Example
///
/// ```
/// use appsync_core::events::{EventBroadcaster, RecordEvent};
///
/// let broadcaster = EventBroadcaster::new();
/// let mut receiver = broadcaster.subscribe();
///
/// broadcaster.send(RecordEvent::created("application", "my-app"));
/// let event = receiver.try_recv().unwrap();
/// assert_eq!(event.key, "my-app");
/// ```
#[derive(Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<RecordEvent>,
}

impl EventBroadcaster {
    /// Create a new broadcaster with default buffer size.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new broadcaster with custom buffer size.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new broadcaster wrapped in an Arc for sharing.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Send an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, 0 when
    /// nobody is listening.
    pub fn send(&self, event: RecordEvent) -> usize {
        self.sender.send(event).unwrap_or_default()
    }

    /// Subscribe to events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RecordEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBroadcaster")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}
