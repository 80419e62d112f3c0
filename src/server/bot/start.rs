use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};
use std::sync::Arc;

use crate::server::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Builds the Discord client without connecting it.
///
/// The HTTP client is returned separately so the announcement dispatcher can post
/// messages while the gateway connection runs in its own task.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token and command prefix
/// - `state` - Shared application state handed to the event handler
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - The client to start and its HTTP handle
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(config: &Config, state: AppState) -> Result<(Client, Arc<Http>), AppError> {
    // MESSAGE_CONTENT and GUILD_MEMBERS are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(state, config.command_prefix.clone());

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;
    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the bot to the gateway and runs until the connection ends.
///
/// Should be called from within a `tokio::spawn` task since it only returns when the
/// bot shuts down or the connection fails for good.
///
/// # Returns
/// - `Ok(())` - The bot shut down
/// - `Err(AppError::DiscordErr)` - Connecting or staying connected failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
