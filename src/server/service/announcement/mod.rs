//! Announcement service for Discord message management.
//!
//! This module provides the `AnnouncementService`, the consumer side of the
//! notification queue. It turns each `Notification` into Discord messages: startup and
//! shutdown announcements, poll messages with their vote reactions, countdown edits,
//! reminders and result tallies.
//!
//! The service is organized into separate modules by concern:
//! - `builder` - Embed building utilities
//! - `server_status` - Startup and shutdown announcements
//! - `poll` - Poll posting, rendering, closing and tallying
//! - `dispatcher` - Task draining the notification queue

pub mod builder;
pub mod dispatcher;
pub mod poll;
pub mod server_status;

use serenity::{
    all::{ChannelId, MessageId},
    http::{Http, HttpError},
};
use std::{num::NonZeroU64, sync::Arc};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::notification::Notification,
    state::AppState,
};

/// Service delivering notifications to Discord.
///
/// Owns a clone of the application state so it can look up the configured channels
/// and record the message id of a freshly posted poll.
#[derive(Clone)]
pub struct AnnouncementService {
    /// Discord HTTP client for sending and editing messages
    http: Arc<Http>,
    /// Application state for settings lookup and poll message bookkeeping
    state: AppState,
    /// Command prefix quoted in usage hints
    prefix: String,
}

impl AnnouncementService {
    /// Creates a new AnnouncementService instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    /// - `state` - Shared application state
    /// - `prefix` - Command prefix quoted in usage hints, such as `!`
    ///
    /// # Returns
    /// - `AnnouncementService` - New service instance
    pub fn new(http: Arc<Http>, state: AppState, prefix: String) -> Self {
        Self {
            http,
            state,
            prefix,
        }
    }

    /// Delivers a single notification.
    ///
    /// # Returns
    /// - `Ok(())` - The notification was delivered or intentionally skipped
    /// - `Err(AppError)` - A Discord request failed or a channel is missing
    pub async fn handle(&self, notification: Notification) -> Result<(), AppError> {
        match notification {
            Notification::ServerStarted(status) => self.announce_startup(&status).await,
            Notification::ServerShutdown(ended) => self.announce_shutdown(&ended).await,
            Notification::PollCreated(poll) => self.post_poll(&poll).await,
            Notification::PollRender(poll) => self.render_poll(&poll).await,
            Notification::PollNearingExpiry(poll) => self.remind_poll(&poll).await,
            Notification::PollDue(poll) => self.tally_poll(&poll).await,
            Notification::PollExpired(poll) => {
                self.tally_poll(&poll).await?;
                self.close_poll(&poll, "📊 Poll Closed", None).await
            }
            Notification::PollCancelled { poll, cancelled_by } => {
                self.close_poll(&poll, "🚫 Poll Cancelled", Some(&cancelled_by))
                    .await
            }
            Notification::PollCompleted { poll, completed_by } => {
                self.close_poll(&poll, "✅ Poll Completed", Some(&completed_by))
                    .await
            }
        }
    }
}

/// Whether a Discord error means the addressed message or channel no longer exists.
pub(crate) fn is_not_found(err: &serenity::Error) -> bool {
    matches!(
        err,
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.status_code.as_u16() == 404
    )
}

/// Converts a stored channel id, refusing 0 instead of panicking.
pub(crate) fn channel_id(id: u64) -> Result<ChannelId, AppError> {
    NonZeroU64::new(id)
        .map(ChannelId::from)
        .ok_or_else(|| InternalError::ZeroDiscordId { kind: "channel" }.into())
}

/// Converts a stored message id, refusing 0 instead of panicking.
pub(crate) fn message_id(id: u64) -> Result<MessageId, AppError> {
    NonZeroU64::new(id)
        .map(MessageId::from)
        .ok_or_else(|| InternalError::ZeroDiscordId { kind: "message" }.into())
}
