use super::*;
use test_utils::fixture::{self, settings::SSU_CHANNEL_ID};

/// Tests SSU with a host mention and a role name as ping.
///
/// Expected: host shown by display name, ping resolved to the role mention
#[tokio::test]
async fn ssu_resolves_host_and_ping() {
    let (_test, state, mut rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, "!SSU [Downtown] [<@42>] [@Events] [Bring a car]")
        .await
        .unwrap();

    assert_eq!(
        reply,
        format!("✅ Server startup logged in <#{}>", SSU_CHANNEL_ID)
    );

    let Ok(Notification::ServerStarted(status)) = rx.try_recv() else {
        panic!("expected a startup notification");
    };
    assert_eq!(status.host.as_deref(), Some("John Doe"));
    assert_eq!(status.ping.as_deref(), Some("<@&77>"));
    assert_eq!(status.description.as_deref(), Some("Bring a car"));
    assert_eq!(status.started_by.as_deref(), Some("alice"));
}

/// Tests SSU with too few bracketed arguments.
///
/// Expected: usage hint, status unchanged
#[tokio::test]
async fn ssu_requires_three_arguments() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, "!SSU [Downtown] [@john]").await.unwrap_err();

    assert!(reply.contains("Usage: `!SSU"), "{reply}");
    assert!(!state.registry.lock().await.status.status().is_running);
}

/// Tests SSU by a member without an allowed role.
///
/// Expected: permission error listing the allowed roles
#[tokio::test]
async fn ssu_requires_allowed_role() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let mut caller = operator();
    caller.roles = vec!["Visitor".to_string()];
    let ctx = command_context(&state, caller);

    let reply = run_text(&ctx, "!SSU [Downtown] [@john] [@everyone]")
        .await
        .unwrap_err();

    assert_eq!(
        reply,
        "❌ You don't have permission to use this command. Required roles: Host"
    );
}

/// Tests SSD while nothing runs.
///
/// Expected: the not running error quoted back
#[tokio::test]
async fn ssd_requires_running_server() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, "!SSD").await.unwrap_err();

    assert!(reply.starts_with("❌"), "{reply}");
}
