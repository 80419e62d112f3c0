use crate::server::{
    bot::command::{CommandContext, Reply},
    error::{input::InputError, AppError},
    middleware::auth::authorize,
    model::{caller::Capability, server_status::StartServerParams, settings::AnnouncementChannel},
    service::server_status::ServerStatusService,
    util::parse::{normalize_role_ping, parse_bracketed_arguments, parse_user_mention, UserMention},
};

/// `SSU [server_name] [@host] [@ping] [description]`
///
/// Announces a server startup. The host mention is resolved to the user's display
/// name and the ping to a role mention where the role exists.
pub async fn run(ctx: &CommandContext<'_>, args: &str) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Operator]).await?;

    let args = parse_bracketed_arguments(args);
    let [server_name, host, ping, rest @ ..] = args.as_slice() else {
        return Err(InputError::InvalidArguments(format!(
            "Usage: `{}SSU [server_name] [@host] [@ping] [description]`",
            ctx.prefix
        ))
        .into());
    };

    let host = match parse_user_mention(host) {
        UserMention::Id(id) => ctx
            .mention_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("<@{}>", id)),
        UserMention::Name(name) => name,
    };

    let params = StartServerParams {
        server_name: server_name.clone(),
        host,
        ping: normalize_role_ping(ping, |name| ctx.roles.id_by_name(name)),
        description: rest.first().cloned(),
        started_by: ctx.caller.name.clone(),
    };

    ServerStatusService::new(ctx.state).start(params).await?;

    let channel = ctx
        .channel_mention(AnnouncementChannel::Ssu)
        .await
        .unwrap_or_else(|| "the SSU channel".to_string());

    Ok(Reply::Text(format!("✅ Server startup logged in {}", channel)))
}
