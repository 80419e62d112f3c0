use serde_json::json;

use super::*;
use test_utils::fixture::{
    self,
    settings::{ADMIN_TOKEN, OPERATOR_TOKEN},
};

fn configured_app() -> TestBuilder {
    TestBuilder::new().with_settings(fixture::settings::configured())
}

/// Tests that operators may read but not change the allowed roles.
///
/// Expected: 200 on GET /roles, 403 AUTH_002 on POST /roles/add
#[tokio::test]
async fn operator_cannot_change_roles() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app.get("/roles", OPERATOR_TOKEN).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed_roles"], json!(["Host"]));

    let (status, body) = app
        .post("/roles/add", OPERATOR_TOKEN, json!({ "role": "Staff" }))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "AUTH_002");
}

/// Tests adding and clearing allowed roles as an admin client.
///
/// Expected: the new role is listed, then the list is empty
#[tokio::test]
async fn admin_changes_roles() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app
        .post("/roles/add", ADMIN_TOKEN, json!({ "role": "Staff" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed_roles"], json!(["Host", "Staff"]));

    let (status, body) = app.post("/roles/clear", ADMIN_TOKEN, json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed_roles"], json!([]));
}

/// Tests that the settings view never contains API client tokens.
///
/// Expected: 200 listing the clients by name only
#[tokio::test]
async fn settings_omit_tokens() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app.get("/config", ADMIN_TOKEN).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_clients"][0]["name"], "operator");
    assert!(!body.to_string().contains(ADMIN_TOKEN));
    assert!(!body.to_string().contains(OPERATOR_TOKEN));
}

/// Tests that the settings are admin only.
///
/// Expected: 403 AUTH_002 for the operator client
#[tokio::test]
async fn settings_require_admin() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app.get("/config", OPERATOR_TOKEN).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "AUTH_002");
}

/// Tests setting channels from a mention and a raw id in one request.
///
/// Expected: 200 with both channels serialized as strings
#[tokio::test]
async fn sets_channels() {
    let app =
        TestApp::new(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await;

    let (status, body) = app
        .post(
            "/config/channels",
            ADMIN_TOKEN,
            json!({ "ssu_channel": "<#123456789>", "ssup_channel": "987654321" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ssu_channel_id"], "123456789");
    assert_eq!(body["ssup_channel_id"], "987654321");
    assert!(body["ssd_channel_id"].is_null());
}

/// Tests a channel update naming no channel at all.
///
/// Expected: 400 CONFIG_001
#[tokio::test]
async fn channel_update_needs_a_channel() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app.post("/config/channels", ADMIN_TOKEN, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "CONFIG_001");
}

/// Tests an update interval below the accepted range.
///
/// Expected: 400 CONFIG_001 naming the setting
#[tokio::test]
async fn rejects_out_of_range_poll_config() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app
        .post(
            "/config/poll",
            ADMIN_TOKEN,
            json!({ "update_interval_seconds": 5 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "CONFIG_001");
}

/// Tests granting admin rights by user mention.
///
/// Expected: 200 with the user listed among the admin users
#[tokio::test]
async fn adds_admin_user() {
    let app = TestApp::new(configured_app()).await;

    let (status, body) = app
        .post("/config/admins/add", ADMIN_TOKEN, json!({ "user": "<@!4242>" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["admin_users"]
        .as_array()
        .unwrap()
        .contains(&json!("4242")));
}
