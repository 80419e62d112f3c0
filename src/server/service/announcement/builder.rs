//! Announcement embed builders.
//!
//! Pure functions turning status and poll snapshots into Discord embeds. They are
//! shared by the posting and editing paths so every message of a kind looks the same.

use chrono::{DateTime, Utc};
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::server::{
    error::{internal::InternalError, AppError},
    model::{
        poll::Poll,
        server_status::{EndedSession, ServerStatus},
    },
    util::time::format_remaining,
};

pub const FOOTER: &str = "Server Management";

pub const YES_REACTION: &str = "🟢";
pub const NO_REACTION: &str = "🔴";

pub const COLOR_STARTED: u32 = 0x00ff00;
pub const COLOR_SHUTDOWN: u32 = 0xff0000;
pub const COLOR_POLL: u32 = 0x0099ff;
pub const COLOR_REMINDER: u32 = 0xffa500;
pub const COLOR_TIE: u32 = 0xffff00;
pub const COLOR_CLOSED: u32 = 0x95a5a6;

/// Converts a UTC time into a Discord embed timestamp.
///
/// # Returns
/// - `Ok(Timestamp)` - Timestamp for the embed
/// - `Err(AppError::InternalErr(InvalidDiscordTimestamp))` - Time outside Discord's range
pub fn discord_timestamp(at: DateTime<Utc>) -> Result<Timestamp, AppError> {
    Timestamp::from_unix_timestamp(at.timestamp()).map_err(|e| {
        InternalError::InvalidDiscordTimestamp {
            timestamp: at.timestamp(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Builds the startup announcement for a running session.
pub fn startup_embed(status: &ServerStatus, now: DateTime<Utc>) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new()
        .title("🟢 Server Started")
        .color(COLOR_STARTED)
        .field("Server Name", or_unknown(&status.server_name), true)
        .field("Host", or_unknown(&status.host), true)
        .field("Ping", or_unknown(&status.ping), true)
        .field("Started by", or_unknown(&status.started_by), true);

    if let Some(description) = non_empty(&status.description) {
        embed = embed.field("Description", description, false);
    }

    Ok(embed
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(discord_timestamp(now)?))
}

/// Builds the shutdown announcement summarising the session that ended.
pub fn shutdown_embed(ended: &EndedSession) -> Result<CreateEmbed, AppError> {
    let session = &ended.session;
    let mut embed = CreateEmbed::new()
        .title("🔴 Server Shutdown")
        .color(COLOR_SHUTDOWN)
        .field("Shutdown by", &ended.shutdown_by, true);

    match &session.server_name {
        Some(server_name) => {
            embed = embed
                .field("Server", server_name, true)
                .field("Hosted by", or_unknown(&session.host), true);
            if let Some(ping) = non_empty(&session.ping) {
                embed = embed.field("Ping", ping, true);
            }
            if let Some(description) = non_empty(&session.description) {
                embed = embed.field("Description", description, false);
            }
            embed = embed.field("SSU by", or_unknown(&session.started_by), true);
            if let Some(started_at) = session.started_at {
                embed = embed.field("Started", format!("<t:{}:R>", started_at.timestamp()), true);
            }
        }
        None => {
            embed = embed.field("Last SSU Info", "No previous startup recorded", false);
        }
    }

    Ok(embed
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(discord_timestamp(ended.shutdown_at)?))
}

/// Builds the poll embed showing the scheduled time and the time left.
///
/// # Arguments
/// - `poll` - Poll to render
/// - `now` - Time the remaining duration is computed against
pub fn poll_embed(poll: &Poll, now: DateTime<Utc>) -> Result<CreateEmbed, AppError> {
    let mut embed = CreateEmbed::new()
        .title("📊 Server Startup Poll")
        .color(COLOR_POLL)
        .field("Server Name", &poll.server_name, true)
        .field("Scheduled Time", format!("<t:{}:F>", poll.target_time.timestamp()), true)
        .field("Time Until Start", format_remaining(poll.target_time, now), true)
        .field("Created by", &poll.created_by, true);

    embed = match non_empty(&poll.role_target) {
        Some(target) => embed.field("Notifying", target, true),
        None => embed.field("\u{200b}", "\u{200b}", true),
    };

    if let Some(description) = non_empty(&poll.description) {
        embed = embed.field("Description", description, false);
    }

    Ok(embed
        .field(
            "Instructions",
            format!("{YES_REACTION} = Yes, start the server\n{NO_REACTION} = No, don't start"),
            false,
        )
        .field("Poll ID", poll.id.to_string(), true)
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(discord_timestamp(now)?))
}

/// Builds the embed a poll message is replaced with once the poll is closed.
///
/// # Arguments
/// - `poll` - The closed poll
/// - `title` - Headline such as "Poll Cancelled"
/// - `closed_by` - Who closed it, when an operator did
pub fn poll_closed_embed(
    poll: &Poll,
    title: &str,
    closed_by: Option<&str>,
) -> Result<CreateEmbed, AppError> {
    let closed_at = poll.closed_at.unwrap_or(poll.target_time);
    let mut embed = CreateEmbed::new()
        .title(title)
        .color(COLOR_CLOSED)
        .description(format!(
            "Startup poll for **{}** scheduled for <t:{}:F> is {}.",
            poll.server_name,
            poll.target_time.timestamp(),
            poll.state
        ))
        .field("Created by", &poll.created_by, true);

    if let Some(closed_by) = closed_by {
        embed = embed.field("Closed by", closed_by, true);
    }

    Ok(embed
        .footer(CreateEmbedFooter::new(format!("{FOOTER} | Poll {}", poll.id)))
        .timestamp(discord_timestamp(closed_at)?))
}

/// Builds the reminder posted when a poll is about to close.
pub fn nearing_expiry_embed(poll: &Poll, now: DateTime<Utc>) -> Result<CreateEmbed, AppError> {
    Ok(CreateEmbed::new()
        .title("⏰ Poll Closing Soon")
        .color(COLOR_REMINDER)
        .description(format!(
            "The startup poll for **{}** closes in **{}**. Vote now!",
            poll.server_name,
            format_remaining(poll.target_time, now)
        ))
        .field("Poll ID", poll.id.to_string(), true)
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(discord_timestamp(now)?))
}

/// Outcome of a vote count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyResult {
    Approved,
    Rejected,
    Tie,
}

/// Votes counted on a poll message, excluding the bot's own reactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: u64,
    pub no: u64,
}

impl Tally {
    /// Counts votes from `(emoji, count, reacted_by_bot)` triples.
    pub fn from_counts<'a>(reactions: impl IntoIterator<Item = (&'a str, u64, bool)>) -> Self {
        let mut tally = Tally::default();
        for (emoji, count, me) in reactions {
            let votes = if me { count.saturating_sub(1) } else { count };
            if emoji == YES_REACTION {
                tally.yes += votes;
            } else if emoji == NO_REACTION {
                tally.no += votes;
            }
        }
        tally
    }

    pub fn result(&self) -> TallyResult {
        match self.yes.cmp(&self.no) {
            std::cmp::Ordering::Greater => TallyResult::Approved,
            std::cmp::Ordering::Less => TallyResult::Rejected,
            std::cmp::Ordering::Equal => TallyResult::Tie,
        }
    }
}

/// Builds the result embed posted when a poll reaches its target time.
///
/// An approved result carries the startup command usage, written with `prefix`.
pub fn tally_embed(
    poll: &Poll,
    tally: Tally,
    now: DateTime<Utc>,
    prefix: &str,
) -> Result<CreateEmbed, AppError> {
    let (result, color, description) = match tally.result() {
        TallyResult::Approved => (
            "✅ **APPROVED**",
            COLOR_STARTED,
            format!(
                "The server startup has been **approved** with {} votes in favor and {} against.",
                tally.yes, tally.no
            ),
        ),
        TallyResult::Rejected => (
            "❌ **REJECTED**",
            COLOR_SHUTDOWN,
            format!(
                "The server startup has been **rejected** with {} votes against and {} in favor.",
                tally.no, tally.yes
            ),
        ),
        TallyResult::Tie => (
            "⚖️ **TIE**",
            COLOR_TIE,
            format!(
                "The poll resulted in a **tie** with {} votes each. Admin decision required.",
                tally.yes
            ),
        ),
    };

    let mut embed = CreateEmbed::new()
        .title("📊 Poll Results")
        .description(description)
        .color(color)
        .field("Server Name", &poll.server_name, true)
        .field("Result", result, true)
        .field(
            "Vote Count",
            format!("{YES_REACTION} {} | {NO_REACTION} {}", tally.yes, tally.no),
            true,
        );

    if tally.result() == TallyResult::Approved {
        embed = embed.field(
            "Next Step",
            format!(
                "Use `{prefix}SSU [server_name] [@host] [@ping] [description]` command to start the server"
            ),
            false,
        );
    }

    Ok(embed
        .footer(CreateEmbedFooter::new(FOOTER))
        .timestamp(discord_timestamp(now)?))
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
