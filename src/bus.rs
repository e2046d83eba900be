use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::message::RuntimeMessage;

/// One entry in the bus's append-only dispatch log.
#[derive(Debug, Clone, Serialize)]
pub struct BusRecord {
    pub id: Uuid,
    pub published_at: DateTime<Utc>,
    pub message: RuntimeMessage,
}

/// Publish/subscribe channel carrying dispatched runtime messages.
///
/// Fan-out goes through a broadcast channel. Every published message is
/// also appended to an in-memory log, so a consumer can read the most
/// recent dispatch without holding a live subscription. The log has one
/// producer (the dispatch engine) and is append-only.
#[derive(Clone)]
pub struct MessageBus {
    sender: broadcast::Sender<RuntimeMessage>,
    log: Arc<Mutex<Vec<BusRecord>>>,
}

impl MessageBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RuntimeMessage> {
        self.sender.subscribe()
    }

    /// Publish a message, returning the number of live subscribers that
    /// received it. The log entry is appended before the broadcast, so the
    /// message is observable as soon as this returns. Publishing with no
    /// subscribers is not an error.
    pub fn publish(&self, message: RuntimeMessage) -> usize {
        self.log.lock().push(BusRecord {
            id: Uuid::new_v4(),
            published_at: Utc::now(),
            message: message.clone(),
        });
        self.sender.send(message).unwrap_or(0)
    }

    /// The most recently published message, if any.
    pub fn latest(&self) -> Option<RuntimeMessage> {
        self.log.lock().last().map(|record| record.message.clone())
    }

    /// Snapshot of the full dispatch log in publish order.
    pub fn log(&self) -> Vec<BusRecord> {
        self.log.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new(32)
    }
}
