use tokio::sync::mpsc::UnboundedReceiver;

use crate::server::{
    bot::command::{execute, parse_command, CommandContext, GuildRoles, Reply},
    model::{caller::Caller, notification::Notification},
    startup::load_app_state,
    state::AppState,
};
use test_utils::{builder::TestBuilder, context::TestContext};

mod config;
mod server_status;
mod ussup;

/// Role present in the test guild, used for ping resolution.
const EVENTS_ROLE_ID: u64 = 77;

async fn setup(builder: TestBuilder) -> (TestContext, AppState, UnboundedReceiver<Notification>) {
    let test = builder.build().await.unwrap();
    let (state, rx) = load_app_state(test.data_dir()).await.unwrap();
    (test, state, rx)
}

fn guild_roles() -> GuildRoles {
    GuildRoles::new([
        (EVENTS_ROLE_ID, "Events".to_string()),
        (78, "Host".to_string()),
    ])
}

fn operator() -> Caller {
    Caller {
        user_id: Some(1),
        name: "alice".to_string(),
        roles: vec!["Host".to_string()],
        administrator: false,
    }
}

fn admin() -> Caller {
    Caller {
        user_id: Some(test_utils::fixture::settings::ADMIN_USER_ID),
        name: "root".to_string(),
        roles: Vec::new(),
        administrator: false,
    }
}

fn command_context(state: &AppState, caller: Caller) -> CommandContext<'_> {
    CommandContext {
        state,
        caller,
        roles: guild_roles(),
        mentions: vec![(42, "John Doe".to_string())],
        prefix: "!",
    }
}

/// Parses and runs a full command message, returning the text of the reply.
async fn run_text(ctx: &CommandContext<'_>, content: &str) -> Result<String, String> {
    let (command, args) = parse_command(content, ctx.prefix).unwrap();
    match execute(command, ctx, args).await {
        Ok(Reply::Text(text)) => Ok(text),
        Ok(Reply::Embed(_)) => Ok(String::new()),
        Err(e) => Err(e.user_message(ctx.prefix)),
    }
}
