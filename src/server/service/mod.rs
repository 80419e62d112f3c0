//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! entry points (chat commands, REST controllers, the scheduler) and the registry and
//! data layers. Services are responsible for:
//!
//! - **Preconditions**: Checking that the announcement channel for an operation exists
//! - **Orchestration**: Locking the registry, mutating it and persisting the snapshot
//! - **Notification**: Queuing announcements for the Discord side
//!
//! Authorization happens at the entry points through `AuthGuard` before a service is
//! called.

pub mod announcement;
pub mod notifier;
pub mod poll;
pub mod server_status;
pub mod settings;

#[cfg(test)]
mod test;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::settings::AnnouncementChannel,
    registry::Registry,
    state::AppState,
};

/// Returns the configured channel id for an announcement kind.
///
/// # Returns
/// - `Ok(u64)` - The channel id
/// - `Err(AppError::ConfigErr(ChannelNotConfigured))` - No channel is set
pub(crate) async fn require_channel(
    state: &AppState,
    kind: AnnouncementChannel,
) -> Result<u64, AppError> {
    state
        .settings
        .read()
        .await
        .channel(kind)
        .ok_or_else(|| ConfigError::ChannelNotConfigured(kind).into())
}

/// Writes the registry snapshot to the state file.
///
/// Called with the registry lock held. A failed write is logged and otherwise
/// ignored; the in-memory registry remains authoritative and the next successful
/// write catches the file up.
pub(crate) async fn persist_state(state: &AppState, registry: &Registry) {
    if let Err(err) = state.state_repo.save(&registry.snapshot()).await {
        tracing::error!("Failed to persist state: {}", err);
    }
}
