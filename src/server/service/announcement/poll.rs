//! Poll message operations.
//!
//! A poll is displayed by one message in the SSUP channel. The message is posted when
//! the poll is created, edited on every render while the poll is active, replaced by a
//! closed notice once the poll ends, and answered with a result tally when the target
//! time is reached.

use chrono::Utc;
use serenity::all::{CreateMessage, EditMessage, MessageReference, ReactionType};

use crate::server::{
    error::AppError,
    model::{
        poll::{Poll, PollMessage},
        settings::AnnouncementChannel,
    },
    service::{poll::PollService, require_channel},
};

use super::{
    builder::{self, Tally, NO_REACTION, YES_REACTION},
    channel_id, is_not_found, message_id, AnnouncementService,
};

impl AnnouncementService {
    /// Posts the message displaying a new poll and adds the vote reactions.
    ///
    /// The message id is recorded on the poll so later renders can edit it and
    /// operators can address the poll by message id.
    ///
    /// # Returns
    /// - `Ok(())` - Message posted, or the poll was closed before it could be posted
    /// - `Err(AppError::ConfigErr)` - SSUP channel was unset in the meantime
    /// - `Err(AppError::DiscordErr)` - Discord rejected the message
    pub async fn post_poll(&self, poll: &Poll) -> Result<(), AppError> {
        let polls = PollService::new(&self.state);
        if !polls.get(poll.id).await.is_ok_and(|current| current.is_active()) {
            tracing::debug!("Poll {} closed before its message was posted", poll.id);
            return Ok(());
        }

        let channel =
            channel_id(require_channel(&self.state, AnnouncementChannel::Ssup).await?)?;
        let embed = builder::poll_embed(poll, Utc::now())?;

        let mut message = CreateMessage::new().embed(embed);
        if let Some(target) = poll.role_target.as_deref().filter(|t| !t.is_empty()) {
            message = message.content(target);
        }

        let sent = channel.send_message(&self.http, message).await?;

        for emoji in [YES_REACTION, NO_REACTION] {
            if let Err(e) = sent
                .react(&self.http, ReactionType::Unicode(emoji.to_string()))
                .await
            {
                tracing::warn!(
                    "Failed to add {} reaction to poll message {}: {}",
                    emoji,
                    sent.id,
                    e
                );
            }
        }

        polls
            .attach_message(
                poll.id,
                PollMessage {
                    channel_id: channel.get(),
                    message_id: sent.id.get(),
                },
            )
            .await?;

        tracing::info!(
            "Posted poll {} as message {} in channel {}",
            poll.id,
            sent.id,
            channel
        );

        Ok(())
    }

    /// Re-renders an active poll's message with the current remaining time.
    ///
    /// A message that no longer exists cancels the poll it displayed.
    pub async fn render_poll(&self, poll: &Poll) -> Result<(), AppError> {
        let Some(message) = poll.message else {
            tracing::debug!("Poll {} has no message to render yet", poll.id);
            return Ok(());
        };

        let embed = builder::poll_embed(poll, Utc::now())?;
        let edit = EditMessage::new().embed(embed);

        match self
            .http
            .edit_message(
                channel_id(message.channel_id)?,
                message_id(message.message_id)?,
                &edit,
                vec![],
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                tracing::info!(
                    "Poll message {} was deleted, cancelling poll {}",
                    message.message_id,
                    poll.id
                );
                PollService::new(&self.state)
                    .message_deleted(message.message_id)
                    .await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Posts a reminder replying to the poll message when the poll is about to close.
    pub async fn remind_poll(&self, poll: &Poll) -> Result<(), AppError> {
        let Some(message) = poll.message else {
            return Ok(());
        };

        let embed = builder::nearing_expiry_embed(poll, Utc::now())?;
        let channel = channel_id(message.channel_id)?;

        let mut reminder = CreateMessage::new().embed(embed).reference_message(
            MessageReference::from((channel, message_id(message.message_id)?)),
        );
        if let Some(target) = poll.role_target.as_deref().filter(|t| !t.is_empty()) {
            reminder = reminder.content(target);
        }

        match channel.send_message(&self.http, reminder).await {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                tracing::warn!("Poll message {} is gone, skipping reminder", message.message_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Counts the votes on a poll message and posts the result.
    pub async fn tally_poll(&self, poll: &Poll) -> Result<(), AppError> {
        let Some(message) = poll.message else {
            tracing::warn!("Poll {} reached its target without a message to tally", poll.id);
            return Ok(());
        };

        let channel = channel_id(message.channel_id)?;
        let posted = match self
            .http
            .get_message(channel, message_id(message.message_id)?)
            .await
        {
            Ok(posted) => posted,
            Err(e) if is_not_found(&e) => {
                tracing::warn!("Poll message {} not found, no result posted", message.message_id);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let tally = Tally::from_counts(posted.reactions.iter().map(|reaction| {
            let emoji = match &reaction.reaction_type {
                ReactionType::Unicode(emoji) => emoji.as_str(),
                _ => "",
            };
            (emoji, reaction.count, reaction.me)
        }));

        let embed = builder::tally_embed(poll, tally, Utc::now(), &self.prefix)?;
        channel
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        tracing::info!(
            "Poll {} result: {:?} ({} yes, {} no)",
            poll.id,
            tally.result(),
            tally.yes,
            tally.no
        );

        Ok(())
    }

    /// Replaces a closed poll's message with a closed notice.
    pub async fn close_poll(
        &self,
        poll: &Poll,
        title: &str,
        closed_by: Option<&str>,
    ) -> Result<(), AppError> {
        let Some(message) = poll.message else {
            return Ok(());
        };

        let embed = builder::poll_closed_embed(poll, title, closed_by)?;
        let edit = EditMessage::new().embed(embed);

        match self
            .http
            .edit_message(
                channel_id(message.channel_id)?,
                message_id(message.message_id)?,
                &edit,
                vec![],
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_not_found(&e) => {
                tracing::debug!("Poll message {} already deleted", message.message_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
