use tokio::{sync::mpsc, task::JoinHandle};

use crate::server::model::notification::Notification;

use super::AnnouncementService;

impl AnnouncementService {
    /// Spawns the task that drains the notification queue.
    ///
    /// Notifications are delivered one at a time in queue order. A failed delivery is
    /// logged and never retried; the state transition that produced it stands.
    ///
    /// # Arguments
    /// - `rx` - Receiving half created with `NotificationSink::channel`
    ///
    /// # Returns
    /// - `JoinHandle<()>` - Handle of the spawned dispatcher task
    pub fn spawn_dispatcher(self, mut rx: mpsc::UnboundedReceiver<Notification>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(notification) = rx.recv().await {
                let kind = notification.kind();
                if let Err(e) = self.handle(notification).await {
                    tracing::error!("Failed to deliver {} notification: {}", kind, e);
                }
            }

            tracing::info!("Notification dispatcher stopped");
        })
    }
}
