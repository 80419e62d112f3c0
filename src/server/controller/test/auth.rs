use super::*;
use test_utils::fixture::{self, settings::GUEST_TOKEN};

/// Tests the health endpoint without credentials.
///
/// Expected: 200 with status "ok"
#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Tests a secured endpoint without an Authorization header.
///
/// Expected: 401 AUTH_001
#[tokio::test]
async fn rejects_missing_token() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.send(Method::GET, "/status", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTH_001");
}

/// Tests a secured endpoint with a token no API client owns.
///
/// Expected: 401 AUTH_001
#[tokio::test]
async fn rejects_unknown_token() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.get("/status", "not-a-token").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, "AUTH_001");
}

/// Tests an operator endpoint with a client holding no allowed role.
///
/// Expected: 403 AUTH_002 naming the required roles
#[tokio::test]
async fn forbids_client_without_allowed_role() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app.get("/status", GUEST_TOKEN).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_error(&body, "AUTH_002");
    assert_eq!(body["error"]["details"]["required_roles"][0], "Host");
}

/// Tests that the OpenAPI document is served and lists the bearer scheme.
///
/// Expected: 200 with the SSU path documented
#[tokio::test]
async fn serves_openapi_document() {
    let app = TestApp::new(TestBuilder::new().with_settings(fixture::settings::configured())).await;

    let (status, body) = app
        .send(Method::GET, "/api/docs/openapi.json", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/ssu"]["post"].is_object());
    assert!(body["components"]["securitySchemes"]["bearer"].is_object());
}
