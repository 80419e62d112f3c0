//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Warn about guilds the bot will not answer in

use serenity::all::{ActivityData, Context, Ready};

use crate::server::state::AppState;

/// Handles the ready event when the bot connects to Discord.
///
/// This event fires once per bot connection after successful authentication and
/// initial gateway handshake. When the settings bind the bot to one guild, the other
/// guilds it is a member of are logged because commands from them are ignored.
///
/// # Arguments
/// - `state` - Application state for the configured guild
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(state: &AppState, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("for server startups")));

    let Some(guild_id) = state.settings.read().await.guild_id else {
        return;
    };

    for guild in ready.guilds.iter().filter(|g| g.id.get() != guild_id) {
        tracing::warn!(
            "Bot is a member of guild {} but only answers commands in guild {}",
            guild.id,
            guild_id
        );
    }
}
