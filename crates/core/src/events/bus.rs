use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::StudioEvent;

pub const DEFAULT_CAPACITY: usize = 1024;

/// Change notifications between views of the same collection.
///
/// Forms publish on it; lists subscribe to know when to refresh.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<StudioEvent>>,
}

impl EventBus {
    /// `capacity` bounds how far a slow list may lag before it sees `Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers.
    /// Returns the number of subscribers reached; zero is not an error.
    pub fn publish(&self, event: StudioEvent) -> usize {
        match self.sender.send(event) {
            Ok(reached) => reached,
            Err(_) => {
                tracing::trace!("event published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
