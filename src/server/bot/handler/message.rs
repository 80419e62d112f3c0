//! Message handlers: chat command dispatch and poll message deletion.

use serenity::all::{
    ChannelId, Context, CreateMessage, GuildId, Message, MessageId, RoleId,
};

use crate::server::{
    bot::command::{self, CommandContext, GuildRoles, Reply},
    model::caller::Caller,
    service::poll::PollService,
    state::AppState,
};

/// Handles a message that may be a chat command.
///
/// Messages from bots, direct messages and messages from guilds other than the
/// configured one are ignored. A failing command is answered with the error's chat
/// rendering.
///
/// # Arguments
/// - `state` - Shared application state
/// - `prefix` - Prefix chat commands start with
/// - `ctx` - Discord context for the cache and replies
/// - `message` - The message that was sent
pub async fn handle_message(state: &AppState, prefix: &str, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(guild_id) = message.guild_id else {
        return;
    };

    let Some((command, args)) = command::parse_command(&message.content, prefix) else {
        return;
    };

    if let Some(configured) = state.settings.read().await.guild_id {
        if configured != guild_id.get() {
            tracing::debug!("Ignoring command from guild {}", guild_id);
            return;
        }
    }

    let (caller, roles) = resolve_caller(&ctx, &message, guild_id);
    let mentions = message
        .mentions
        .iter()
        .map(|user| (user.id.get(), user.display_name().to_string()))
        .collect();

    tracing::debug!("{} issued {:?}", caller.name, command);

    let command_ctx = CommandContext {
        state,
        caller,
        roles,
        mentions,
        prefix,
    };

    let reply = match command::execute(command, &command_ctx, args).await {
        Ok(reply) => reply,
        Err(e) => Reply::Text(e.user_message(command_ctx.prefix)),
    };

    let outgoing = match reply {
        Reply::Text(text) => CreateMessage::new().content(text),
        Reply::Embed(embed) => CreateMessage::new().embed(embed),
    };

    if let Err(e) = message.channel_id.send_message(&ctx.http, outgoing).await {
        tracing::warn!(
            "Failed to reply to {:?} in channel {}: {}",
            command,
            message.channel_id,
            e
        );
    }
}

/// Cancels the poll displayed by a message that was deleted.
///
/// Deleting any other message is a no-op.
pub async fn handle_message_delete(
    state: &AppState,
    _ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    _guild_id: Option<GuildId>,
) {
    match PollService::new(state)
        .message_deleted(deleted_message_id.get())
        .await
    {
        Ok(Some(poll)) => tracing::info!(
            "Poll {} cancelled, its message {} was deleted from channel {}",
            poll.id,
            deleted_message_id,
            channel_id
        ),
        Ok(None) => {}
        Err(e) => tracing::error!(
            "Failed to cancel poll of deleted message {}: {}",
            deleted_message_id,
            e
        ),
    }
}

/// Builds the caller identity and the guild's role list from the cache.
///
/// The guild owner and members holding a role with the administrator permission are
/// administrators. Without a cached guild the caller has no roles.
fn resolve_caller(ctx: &Context, message: &Message, guild_id: GuildId) -> (Caller, GuildRoles) {
    let name = message
        .member
        .as_ref()
        .and_then(|member| member.nick.clone())
        .unwrap_or_else(|| message.author.display_name().to_string());

    let member_roles: Vec<RoleId> = message
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    let mut caller = Caller {
        user_id: Some(message.author.id.get()),
        name,
        roles: Vec::new(),
        administrator: false,
    };

    let Some(guild) = ctx.cache.guild(guild_id) else {
        tracing::warn!("Guild {} is not cached, resolving caller without roles", guild_id);
        return (caller, GuildRoles::default());
    };

    caller.administrator = guild.owner_id == message.author.id
        || member_roles.iter().any(|id| {
            guild
                .roles
                .get(id)
                .is_some_and(|role| role.permissions.administrator())
        });
    caller.roles = member_roles
        .iter()
        .filter_map(|id| guild.roles.get(id).map(|role| role.name.clone()))
        .collect();

    let roles = GuildRoles::new(
        guild
            .roles
            .values()
            .map(|role| (role.id.get(), role.name.clone())),
    );

    (caller, roles)
}
