//! Chat commands.
//!
//! Every command is a plain async function over a `CommandContext`, which carries the
//! caller and the guild data the handler resolved from the cache. Commands check
//! their capability through the authorization gate, call into a service and return a
//! `Reply`; they never talk to Discord themselves.
//!
//! - `ssu` / `ssd` - Announce server startup and shutdown
//! - `ssup` - Create a startup poll
//! - `ussup` - Refresh, complete or cancel a poll
//! - `polls` - List active polls
//! - `config` - Show and change settings
//! - `help` - List the commands

pub mod config;
pub mod help;
pub mod polls;
pub mod ssd;
pub mod ssu;
pub mod ssup;
pub mod ussup;

#[cfg(test)]
mod test;

use serenity::all::CreateEmbed;

use crate::server::{
    error::AppError,
    model::{caller::Caller, settings::AnnouncementChannel},
    state::AppState,
};

/// Commands the bot answers to. Names are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ssu,
    Ssd,
    Ssup,
    Ussup,
    Polls,
    Config,
    Help,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ssu" => Some(Self::Ssu),
            "ssd" => Some(Self::Ssd),
            "ssup" => Some(Self::Ssup),
            "ussup" => Some(Self::Ussup),
            "polls" => Some(Self::Polls),
            "config" => Some(Self::Config),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Answer to a command, posted in the channel it was issued in.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Embed(CreateEmbed),
}

/// Role names and ids of the guild a command was issued in.
#[derive(Debug, Clone, Default)]
pub struct GuildRoles(Vec<(u64, String)>);

impl GuildRoles {
    pub fn new(roles: impl IntoIterator<Item = (u64, String)>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// Resolves a role name, ignoring case.
    pub fn id_by_name(&self, name: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(_, role)| role.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    pub fn name_by_id(&self, id: u64) -> Option<String> {
        self.0
            .iter()
            .find(|(role_id, _)| *role_id == id)
            .map(|(_, name)| name.clone())
    }
}

/// Everything a command needs besides its arguments.
pub struct CommandContext<'a> {
    pub state: &'a AppState,
    pub caller: Caller,
    pub roles: GuildRoles,
    /// Users mentioned in the command message, as id and display name.
    pub mentions: Vec<(u64, String)>,
    /// Prefix the command was issued with, for usage hints.
    pub prefix: &'a str,
}

impl CommandContext<'_> {
    /// Display name of a mentioned user.
    pub fn mention_name(&self, user_id: u64) -> Option<&str> {
        self.mentions
            .iter()
            .find(|(id, _)| *id == user_id)
            .map(|(_, name)| name.as_str())
    }

    /// Mention of the configured channel for an announcement kind, if set.
    pub async fn channel_mention(&self, kind: AnnouncementChannel) -> Option<String> {
        self.state
            .settings
            .read()
            .await
            .channel(kind)
            .map(|id| format!("<#{}>", id))
    }
}

/// Splits a message into a known command and the text after its name.
///
/// # Arguments
/// - `content` - Full message text
/// - `prefix` - Prefix commands start with
///
/// # Returns
/// - `Some((Command, &str))` - The command and its unparsed arguments
/// - `None` - Not a command, or not one the bot knows
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<(Command, &'a str)> {
    let body = content.trim_start().strip_prefix(prefix)?;
    let (name, args) = match body.find(char::is_whitespace) {
        Some(split) => (&body[..split], body[split..].trim()),
        None => (body, ""),
    };

    Command::from_name(name).map(|command| (command, args))
}

/// Runs a command.
///
/// # Returns
/// - `Ok(Reply)` - Answer to post
/// - `Err(AppError)` - Answered with `AppError::user_message`
pub async fn execute(
    command: Command,
    ctx: &CommandContext<'_>,
    args: &str,
) -> Result<Reply, AppError> {
    match command {
        Command::Ssu => ssu::run(ctx, args).await,
        Command::Ssd => ssd::run(ctx).await,
        Command::Ssup => ssup::run(ctx, args).await,
        Command::Ussup => ussup::run(ctx, args).await,
        Command::Polls => polls::run(ctx).await,
        Command::Config => config::run(ctx, args).await,
        Command::Help => Ok(help::run(ctx)),
    }
}
