use chrono::Utc;

use crate::server::{
    bot::command::{CommandContext, Reply},
    error::AppError,
    middleware::auth::authorize,
    model::caller::Capability,
    service::poll::PollService,
    util::time::format_remaining,
};

/// `polls`: lists the active polls, soonest first.
pub async fn run(ctx: &CommandContext<'_>) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Operator]).await?;

    let polls = PollService::new(ctx.state).list_active().await;
    if polls.is_empty() {
        return Ok(Reply::Text("No active polls.".to_string()));
    }

    let now = Utc::now();
    let lines: Vec<String> = polls
        .iter()
        .map(|poll| {
            let message = poll
                .message
                .map(|m| format!(" (message `{}`)", m.message_id))
                .unwrap_or_default();
            format!(
                "**#{}** {} - starts in {}{}",
                poll.id,
                poll.server_name,
                format_remaining(poll.target_time, now),
                message
            )
        })
        .collect();

    Ok(Reply::Text(format!(
        "📊 **Active polls ({})**\n{}",
        polls.len(),
        lines.join("\n")
    )))
}
