//! Single-slot state machine for the announced server session.

use chrono::{DateTime, Utc};

use crate::server::{
    error::status::StatusError,
    model::server_status::{EndedSession, ServerStatus, StartServerParams},
};

/// Holds the status of the announced server.
///
/// The register only moves idle → running on `start` and running → idle on
/// `shutdown`. Shutting down resets the status to `ServerStatus::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRegister {
    status: ServerStatus,
}

impl StatusRegister {
    pub fn new(status: ServerStatus) -> Self {
        Self { status }
    }

    /// Marks the server as running and records the session metadata.
    ///
    /// # Arguments
    /// - `params` - Startup details from the command
    /// - `now` - Time recorded as the session start
    ///
    /// # Returns
    /// - `Ok(ServerStatus)` - Snapshot of the new running status
    /// - `Err(StatusError::AlreadyRunning)` - A session is already running
    pub fn start(
        &mut self,
        params: StartServerParams,
        now: DateTime<Utc>,
    ) -> Result<ServerStatus, StatusError> {
        if self.status.is_running {
            return Err(StatusError::AlreadyRunning {
                server_name: self.status.server_name.clone(),
            });
        }

        self.status = ServerStatus {
            is_running: true,
            server_name: Some(params.server_name),
            host: Some(params.host),
            ping: Some(params.ping),
            description: params.description,
            started_by: Some(params.started_by),
            started_at: Some(now),
        };

        Ok(self.status.clone())
    }

    /// Resets the register to idle.
    ///
    /// # Arguments
    /// - `shutdown_by` - Display name of whoever shut the session down
    /// - `now` - Time recorded as the shutdown time
    ///
    /// # Returns
    /// - `Ok(EndedSession)` - The session as it was right before shutdown
    /// - `Err(StatusError::NotRunning)` - No session is running
    pub fn shutdown(
        &mut self,
        shutdown_by: &str,
        now: DateTime<Utc>,
    ) -> Result<EndedSession, StatusError> {
        if !self.status.is_running {
            return Err(StatusError::NotRunning);
        }

        let session = std::mem::take(&mut self.status);

        Ok(EndedSession {
            session,
            shutdown_by: shutdown_by.to_string(),
            shutdown_at: now,
        })
    }

    pub fn status(&self) -> &ServerStatus {
        &self.status
    }
}
