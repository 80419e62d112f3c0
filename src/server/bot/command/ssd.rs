use crate::server::{
    bot::command::{CommandContext, Reply},
    error::AppError,
    middleware::auth::authorize,
    model::{caller::Capability, settings::AnnouncementChannel},
    service::server_status::ServerStatusService,
};

/// `SSD`: announces the shutdown of the running session.
pub async fn run(ctx: &CommandContext<'_>) -> Result<Reply, AppError> {
    authorize(ctx.state, &ctx.caller, &[Capability::Operator]).await?;

    ServerStatusService::new(ctx.state)
        .shutdown(&ctx.caller.name)
        .await?;

    let channel = ctx
        .channel_mention(AnnouncementChannel::Ssd)
        .await
        .unwrap_or_else(|| "the SSD channel".to_string());

    Ok(Reply::Text(format!("✅ Server shutdown logged in {}", channel)))
}
