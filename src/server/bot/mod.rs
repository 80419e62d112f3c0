//! Discord bot integration: gateway events and chat commands.
//!
//! The bot listens for prefixed chat commands in the configured guild and answers
//! them in the channel they were issued in. Announcements themselves are not posted
//! from here; commands call into the services, which queue notifications for the
//! `AnnouncementService` dispatcher.
//!
//! The bot is initialized during startup and runs in a separate tokio task so it does
//! not block the REST server. Its HTTP client is shared with the dispatcher to send
//! and edit messages without a second connection to Discord.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild, role and channel data for the cache
//! - `GUILD_MESSAGES` - Command messages and poll message deletions
//! - `MESSAGE_CONTENT` - The text of command messages (privileged intent)
//! - `GUILD_MEMBERS` - Member roles and display names (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` and `GUILD_MEMBERS` are privileged intents and must be
//! explicitly enabled in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
