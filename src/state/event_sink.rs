//! Broadcast sink for engine events

use tokio::sync::broadcast;
use tracing::trace;

use crate::engine::{TimerEvent, TimerSink};

/// Publishes every engine event to all current subscribers
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<TimerEvent>,
}

impl EventBroadcaster {
    pub fn new(tx: broadcast::Sender<TimerEvent>) -> Self {
        Self { tx }
    }
}

impl TimerSink for EventBroadcaster {
    fn emit(&mut self, event: TimerEvent) {
        // Having nobody listening is normal, e.g. before the first client connects
        if let Err(e) = self.tx.send(event) {
            trace!("No subscribers for timer event {}", e.0.kind());
        }
    }
}
