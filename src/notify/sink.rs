// Notification sinks

use tokio::sync::mpsc;
use tracing::debug;

use super::types::Notification;

/// Receives notifications. Must not block.
pub trait NotificationSink: Send + Sync {
    fn add(&self, notification: Notification);
}

/// Sink that forwards every notification over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn add(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            debug!("Notification receiver dropped, discarding notification");
        }
    }
}
