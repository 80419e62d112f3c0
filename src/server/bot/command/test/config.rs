use super::*;
use test_utils::fixture;

/// Tests the config command from a member who is neither admin user nor administrator.
///
/// Expected: permission error
#[tokio::test]
async fn config_requires_admin() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, operator());

    let reply = run_text(&ctx, "!config clear_roles").await.unwrap_err();

    assert_eq!(reply, "❌ You don't have permission to use this command.");
    assert_eq!(state.settings.read().await.allowed_roles, vec!["Host"]);
}

/// Tests adding an allowed role by role mention.
///
/// Expected: the mention is resolved to the role name and added once
#[tokio::test]
async fn adds_role_by_mention() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, admin());

    let reply = run_text(&ctx, "!config add_role <@&77>").await.unwrap();
    assert_eq!(reply, "✅ Added role `Events` to allowed roles");

    let reply = run_text(&ctx, "!config add_role Events").await.unwrap();
    assert_eq!(reply, "❌ Role `Events` is already in allowed roles");

    assert_eq!(
        state.settings.read().await.allowed_roles,
        vec!["Host", "Events"]
    );
}

/// Tests setting a channel by mention.
///
/// Expected: channel stored and echoed back
#[tokio::test]
async fn sets_channel_by_mention() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await;
    let mut caller = admin();
    caller.administrator = true;
    let ctx = command_context(&state, caller);

    let reply = run_text(&ctx, "!config ssd_channel <#123456789>")
        .await
        .unwrap();

    assert_eq!(reply, "✅ SSD channel set to <#123456789>");
    assert_eq!(state.settings.read().await.ssd_channel_id, Some(123456789));
}

/// Tests a poll interval outside the accepted range.
///
/// Expected: rejected, interval unchanged
#[tokio::test]
async fn rejects_out_of_range_interval() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, admin());

    let reply = run_text(&ctx, "!config poll_interval 2").await.unwrap_err();

    assert!(reply.contains("poll_interval"), "{reply}");
    assert_eq!(state.settings.read().await.poll.update_interval_seconds, 60);
}

/// Tests an unknown setting name.
///
/// Expected: error pointing at the config listing
#[tokio::test]
async fn rejects_unknown_setting() {
    let (_test, state, _rx) =
        setup(TestBuilder::new().with_settings(fixture::settings::configured())).await;
    let ctx = command_context(&state, admin());

    let reply = run_text(&ctx, "!config colour blue").await.unwrap_err();

    assert!(reply.contains("Unknown setting `colour`"), "{reply}");
}
