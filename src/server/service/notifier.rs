//! Fire-and-forget notification queue.

use tokio::sync::mpsc;

use crate::server::model::notification::Notification;

/// Sending half of the notification queue.
///
/// `notify` never blocks and never fails from the caller's point of view, so it is
/// safe to call while the registry lock is held. Once the dispatcher is gone the
/// notification is dropped with a warning.
#[derive(Clone, Debug)]
pub struct NotificationSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationSink {
    /// Creates the sink together with the receiver the dispatcher consumes.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn notify(&self, notification: Notification) {
        let kind = notification.kind();
        if self.tx.send(notification).is_err() {
            tracing::warn!("Dropped {} notification: dispatcher is not running", kind);
        }
    }
}
