//! Helpers for driving the full router in integration tests.

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use symposium_test_utils::TestSetup;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use symposium::{model::app::AppState, router};

/// Builds the application router on top of a test setup, with an in-memory
/// session store standing in for Redis.
pub fn app(test: &TestSetup) -> Router {
    let state: AppState = test.state();
    let session_layer = SessionManagerLayer::new(MemoryStore::default());

    router::routes().with_state(state).layer(session_layer)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();

    read_response(response).await
}

/// Sends a single-file multipart upload to a materials endpoint.
pub async fn send_upload(
    app: &Router,
    uri: &str,
    cookie: &str,
    file_name: &str,
    bytes: &[u8],
) -> (StatusCode, Option<String>, Value) {
    let boundary = "symposium-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("cookie", cookie)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    read_response(response).await
}

async fn read_response(response: Response<Body>) -> (StatusCode, Option<String>, Value) {
    let status = response.status();

    let session_cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, session_cookie, json)
}
