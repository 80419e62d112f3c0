use chrono::Utc;

use crate::server::{
    bot::command::{CommandContext, Reply},
    error::{input::InputError, AppError},
    middleware::auth::authorize,
    model::{caller::Capability, poll::CreatePollParams},
    service::poll::PollService,
    util::{
        parse::{normalize_role_ping, parse_bracketed_arguments},
        time::format_remaining,
    },
};

/// `SSUP [server_name] [time] [@role] [description]`
///
/// Creates a startup poll closing after `time`, such as `45min` or `1d12h`.
pub async fn run(ctx: &CommandContext<'_>, args: &str) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Operator]).await?;

    let args = parse_bracketed_arguments(args);
    let [server_name, duration, rest @ ..] = args.as_slice() else {
        return Err(InputError::InvalidArguments(format!(
            "Usage: `{}SSUP [server_name] [time] [@role] [description]`",
            ctx.prefix
        ))
        .into());
    };

    let params = CreatePollParams {
        server_name: server_name.clone(),
        duration_expr: duration.clone(),
        role_target: rest
            .first()
            .map(|target| normalize_role_ping(target, |name| ctx.roles.id_by_name(name))),
        description: rest.get(1).cloned(),
        created_by: ctx.caller.name.clone(),
    };

    let poll = PollService::new(ctx.state).create(params).await?;

    let mut reply = format!(
        "✅ Server startup poll #{} created, closes in **{}**",
        poll.id,
        format_remaining(poll.target_time, Utc::now())
    );
    if let Some(target) = &poll.role_target {
        reply.push_str(&format!(" (notifying {})", target));
    }

    Ok(Reply::Text(reply))
}
