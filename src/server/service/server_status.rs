use chrono::Utc;

use crate::server::{
    error::{input::InputError, AppError},
    model::{
        notification::Notification,
        server_status::{EndedSession, ServerStatus, StartServerParams},
        settings::AnnouncementChannel,
    },
    service::{persist_state, require_channel},
    state::AppState,
};

/// Service orchestrating server startup and shutdown announcements.
///
/// Each operation checks that the announcement channel is configured, then mutates
/// the status register, persists the new state and queues the announcement while
/// holding the registry lock, so announcements leave in the order of the changes.
pub struct ServerStatusService<'a> {
    state: &'a AppState,
}

impl<'a> ServerStatusService<'a> {
    /// Creates a new ServerStatusService instance.
    ///
    /// # Arguments
    /// - `state` - Shared application state
    ///
    /// # Returns
    /// - `ServerStatusService` - New service instance
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Announces a server startup.
    ///
    /// # Arguments
    /// - `params` - Server name, host, ping target, description and starting user
    ///
    /// # Returns
    /// - `Ok(ServerStatus)` - The new running status
    /// - `Err(AppError::ConfigErr(ChannelNotConfigured))` - No SSU channel set
    /// - `Err(AppError::InputErr)` - Empty server name
    /// - `Err(AppError::StatusErr(AlreadyRunning))` - A session is already running
    pub async fn start(&self, params: StartServerParams) -> Result<ServerStatus, AppError> {
        require_channel(self.state, AnnouncementChannel::Ssu).await?;

        if params.server_name.trim().is_empty() {
            return Err(
                InputError::InvalidArguments("server name must not be empty".to_string()).into(),
            );
        }

        let mut registry = self.state.registry.lock().await;
        let status = registry.status.start(params, Utc::now())?;
        persist_state(self.state, &registry).await;
        self.state
            .notifier
            .notify(Notification::ServerStarted(status.clone()));
        drop(registry);

        tracing::info!(
            "Server {} started by {}",
            status.server_name.as_deref().unwrap_or_default(),
            status.started_by.as_deref().unwrap_or_default()
        );

        Ok(status)
    }

    /// Announces the shutdown of the running session.
    ///
    /// # Arguments
    /// - `shutdown_by` - Display name of the user shutting the session down
    ///
    /// # Returns
    /// - `Ok(EndedSession)` - The session as it was before shutdown
    /// - `Err(AppError::ConfigErr(ChannelNotConfigured))` - No SSD channel set
    /// - `Err(AppError::StatusErr(NotRunning))` - No session is running
    pub async fn shutdown(&self, shutdown_by: &str) -> Result<EndedSession, AppError> {
        require_channel(self.state, AnnouncementChannel::Ssd).await?;

        let mut registry = self.state.registry.lock().await;
        let ended = registry.status.shutdown(shutdown_by, Utc::now())?;
        persist_state(self.state, &registry).await;
        self.state
            .notifier
            .notify(Notification::ServerShutdown(ended.clone()));
        drop(registry);

        tracing::info!(
            "Server {} shut down by {}",
            ended.session.server_name.as_deref().unwrap_or_default(),
            ended.shutdown_by
        );

        Ok(ended)
    }

    /// Returns a snapshot of the current status.
    pub async fn status(&self) -> ServerStatus {
        self.state.registry.lock().await.status.status().clone()
    }
}
