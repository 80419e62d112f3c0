//! Startup and shutdown announcements.

use chrono::Utc;
use serenity::all::CreateMessage;

use crate::server::{
    error::AppError,
    model::{
        server_status::{EndedSession, ServerStatus},
        settings::AnnouncementChannel,
    },
    service::require_channel,
};

use super::{builder, channel_id, AnnouncementService};

impl AnnouncementService {
    /// Posts the startup announcement with the ping target above the embed.
    ///
    /// # Arguments
    /// - `status` - The running status just recorded
    ///
    /// # Returns
    /// - `Ok(())` - Announcement posted
    /// - `Err(AppError::ConfigErr)` - SSU channel was unset in the meantime
    /// - `Err(AppError::DiscordErr)` - Discord rejected the message
    pub async fn announce_startup(&self, status: &ServerStatus) -> Result<(), AppError> {
        let channel =
            channel_id(require_channel(&self.state, AnnouncementChannel::Ssu).await?)?;
        let embed = builder::startup_embed(status, Utc::now())?;

        let mut message = CreateMessage::new().embed(embed);
        if let Some(ping) = status.ping.as_deref().filter(|p| !p.is_empty()) {
            message = message.content(ping);
        }

        channel.send_message(&self.http, message).await?;

        tracing::info!("Posted startup announcement in channel {}", channel);

        Ok(())
    }

    /// Posts the shutdown announcement, pinging the session's target again.
    ///
    /// # Arguments
    /// - `ended` - The session that was shut down
    ///
    /// # Returns
    /// - `Ok(())` - Announcement posted
    /// - `Err(AppError::ConfigErr)` - SSD channel was unset in the meantime
    /// - `Err(AppError::DiscordErr)` - Discord rejected the message
    pub async fn announce_shutdown(&self, ended: &EndedSession) -> Result<(), AppError> {
        let channel =
            channel_id(require_channel(&self.state, AnnouncementChannel::Ssd).await?)?;
        let embed = builder::shutdown_embed(ended)?;

        let mut message = CreateMessage::new().embed(embed);
        if let Some(ping) = ended.session.ping.as_deref().filter(|p| !p.is_empty()) {
            message = message.content(ping);
        }

        channel.send_message(&self.http, message).await?;

        tracing::info!("Posted shutdown announcement in channel {}", channel);

        Ok(())
    }
}
