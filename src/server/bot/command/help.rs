use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::server::{
    bot::command::{CommandContext, Reply},
    service::announcement::builder::{COLOR_POLL, FOOTER},
};

/// `help`: lists every command with its format.
pub fn run(ctx: &CommandContext<'_>) -> Reply {
    Reply::Embed(help_embed(ctx.prefix))
}

pub fn help_embed(prefix: &str) -> CreateEmbed {
    let p = prefix;

    CreateEmbed::new()
        .title("🤖 Server Management Bot - Help")
        .description("Server management commands with bracket format")
        .color(COLOR_POLL)
        .timestamp(Timestamp::now())
        .field(
            format!("🟢 {p}SSU - Server Start Up"),
            format!(
                "Format: `{p}SSU [server_name] [@host] [@ping] [description]`\n\
                 Example: `{p}SSU [Testing Server] [@john] [@everyone] [Server restart for updates]`"
            ),
            false,
        )
        .field(
            format!("📊 {p}SSUP - Server Start Up Poll"),
            format!(
                "Format: `{p}SSUP [server_name] [time] [@role] [description]`\n\
                 Example: `{p}SSUP [Testing Server] [45min] [@everyone] [Server restart for updates]`\n\
                 Time formats: `[45min]`, `[2h]`, `[1d30min]`, `[1w]`, `[1mo]`, `[1y]`"
            ),
            false,
        )
        .field(
            format!("🔄 {p}USSUP - Update Poll"),
            format!(
                "Format: `{p}USSUP <poll_id | message_id> [complete | cancel]`\n\
                 Refresh a poll now, close an overdue poll, or cancel it"
            ),
            false,
        )
        .field(
            format!("📋 {p}polls - Active Polls"),
            "List active polls, soonest first",
            false,
        )
        .field(
            format!("🔴 {p}SSD - Server Shut Down"),
            format!("Format: `{p}SSD`\nShut down the currently running server"),
            false,
        )
        .field(
            format!("⚙️ {p}config - Configuration (Admin)"),
            format!("Configure channels, roles and polls\nUse `{p}config` to see current settings"),
            false,
        )
        .field(
            "📝 Format Notes",
            "• Use square brackets `[text]` for parameters\n\
             • @ mentions work for hosts and roles\n\
             • Description is optional in SSU and SSUP\n\
             • Time supports: min, h, d, w, mo, y",
            false,
        )
        .footer(CreateEmbedFooter::new(FOOTER))
}
