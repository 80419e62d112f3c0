use serde_json::json;

use super::*;
use test_utils::fixture::{
    self,
    settings::{ADMIN_TOKEN, OPERATOR_TOKEN},
};

fn start_body() -> Value {
    json!({
        "server_name": "Downtown",
        "host": "john",
        "ping": "everyone",
        "description": "Bring your own car"
    })
}

/// Tests announcing a startup and then trying again while it runs.
///
/// Expected: 201 with the running status, then 409 SSU_001 naming the server
#[tokio::test]
async fn starts_server_once() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.post("/ssu", OPERATOR_TOKEN, start_body()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_running"], true);
    assert_eq!(body["server_name"], "Downtown");
    assert_eq!(body["ping"], "@everyone");
    assert_eq!(body["started_by"], "operator");

    let (status, body) = app.post("/ssu", OPERATOR_TOKEN, start_body()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "SSU_001");
    assert_eq!(body["error"]["details"]["server_name"], "Downtown");
}

/// Tests announcing a startup before the SSU channel is configured.
///
/// Expected: 503 CONFIG_002
#[tokio::test]
async fn start_requires_configured_channel() {
    let app =
        TestApp::new(TestBuilder::new().with_settings(fixture::settings::unconfigured())).await;

    let (status, body) = app.post("/ssu", ADMIN_TOKEN, start_body()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_error(&body, "CONFIG_002");
}

/// Tests shutting down the session restored from state.json.
///
/// Expected: 200 with the ended session, status idle afterwards
#[tokio::test]
async fn shuts_down_running_server() {
    let app = TestApp::new(
        TestBuilder::new()
            .with_settings(fixture::settings::configured())
            .with_state(fixture::state::running()),
    )
    .await;

    let (status, body) = app.post("/ssd", OPERATOR_TOKEN, json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["server_name"], fixture::state::SERVER_NAME);
    assert_eq!(body["shutdown_by"], "operator");

    let (status, body) = app.get("/status", OPERATOR_TOKEN).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_running"], false);
}

/// Tests shutting down while nothing runs.
///
/// Expected: 409 SSD_001
#[tokio::test]
async fn shutdown_requires_running_server() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.post("/ssd", OPERATOR_TOKEN, json!({})).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "SSD_001");
}

/// Tests a request body missing required fields.
///
/// Expected: 400 VALIDATION_001 in the standard envelope
#[tokio::test]
async fn rejects_malformed_body() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app
        .post("/ssu", OPERATOR_TOKEN, json!({ "server_name": "Downtown" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "VALIDATION_001");
}
