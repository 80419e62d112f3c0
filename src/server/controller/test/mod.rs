use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, Request, StatusCode,
    },
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

use crate::server::{
    model::notification::Notification, router::router, startup::load_app_state,
};
use test_utils::{builder::TestBuilder, context::TestContext};

mod auth;
mod server_status;
mod settings;

/// Router wired to a freshly loaded state, plus everything that must outlive it.
struct TestApp {
    _test: TestContext,
    _rx: UnboundedReceiver<Notification>,
    app: Router,
}

impl TestApp {
    async fn new(builder: TestBuilder) -> Self {
        let test = builder.build().await.unwrap();
        let (state, rx) = load_app_state(test.data_dir()).await.unwrap();

        Self {
            _test: test,
            _rx: rx,
            app: router().with_state(state),
        }
    }

    /// Sends one request and returns the status with the parsed JSON body.
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }
}

/// Asserts that a body is the error envelope carrying the given code.
fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["status"], "error", "{body}");
    assert_eq!(body["error"]["code"], code, "{body}");
    assert!(
        body["error"]["correlation_id"]
            .as_str()
            .is_some_and(|id| !id.is_empty()),
        "{body}"
    );
    assert!(body["timestamp"].is_string(), "{body}");
}
