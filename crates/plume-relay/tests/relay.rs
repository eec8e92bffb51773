//! End-to-end tests for the relay endpoints against stub upstreams.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use plume_relay::{build_router, RelayConfig, RelayState, RELAY_ERROR_MESSAGE};

/// Serve a router on an ephemeral port and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Stub Ollama upstream: echoes the requested model back so tests can
/// verify the body was forwarded.
fn stub_upstream() -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "response": "hello from upstream",
                    "prompt_eval_count": 3,
                    "eval_count": 7,
                    "echo_model": body.get("model").cloned().unwrap_or(Value::Null),
                }))
            }),
        )
        .route(
            "/api/tags",
            get(|| async {
                Json(json!({
                    "models": [{ "name": "llama3" }, { "name": "mistral" }],
                }))
            }),
        )
}

fn relay_state(upstream_url: &str, tunnel_url: Option<&str>) -> Arc<RelayState> {
    Arc::new(RelayState::new(RelayConfig {
        upstream_url: upstream_url.to_string(),
        tunnel_url: tunnel_url.map(String::from),
    }))
}

#[tokio::test]
async fn test_relay_returns_upstream_json_unchanged() {
    let upstream = spawn(stub_upstream()).await;
    let relay = spawn(build_router(relay_state(&upstream, None))).await;

    let client = reqwest::Client::new();
    let reply = client
        .post(format!("{}/api/ollama", relay))
        .json(&json!({ "model": "llama3", "prompt": "hi", "stream": false }))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 200);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["response"], "hello from upstream");
    assert_eq!(body["prompt_eval_count"], 3);
    assert_eq!(body["echo_model"], "llama3");
}

#[tokio::test]
async fn test_relay_unreachable_upstream_yields_fixed_500() {
    // Nothing listens on this port.
    let relay = spawn(build_router(relay_state("http://127.0.0.1:9", None))).await;

    let client = reqwest::Client::new();
    let reply = client
        .post(format!("{}/api/ollama", relay))
        .json(&json!({ "prompt": "hi" }))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 500);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["error"], RELAY_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_relay_upstream_error_status_yields_fixed_500() {
    let failing = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
    );
    let upstream = spawn(failing).await;
    let relay = spawn(build_router(relay_state(&upstream, None))).await;

    let client = reqwest::Client::new();
    let reply = client
        .post(format!("{}/api/ollama", relay))
        .json(&json!({ "prompt": "hi" }))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 500);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["error"], RELAY_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_probe_reports_reachable_tunnel() {
    let upstream = spawn(stub_upstream()).await;
    let relay = spawn(build_router(relay_state(
        "http://127.0.0.1:9",
        Some(&upstream),
    )))
    .await;

    let client = reqwest::Client::new();
    let reply = client
        .get(format!("{}/api/test-tunnel", relay))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 200);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["modelsCount"], 2);
    assert_eq!(body["tunnelUrl"], upstream);
}

#[tokio::test]
async fn test_probe_without_tunnel_reports_config_error() {
    let relay = spawn(build_router(relay_state("http://127.0.0.1:9", None))).await;

    let client = reqwest::Client::new();
    let reply = client
        .get(format!("{}/api/test-tunnel", relay))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 200);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "OLLAMA_TUNNEL_URL not defined");
}

#[tokio::test]
async fn test_probe_unreachable_tunnel_reports_error() {
    let relay = spawn(build_router(relay_state(
        "http://127.0.0.1:9",
        Some("http://127.0.0.1:9"),
    )))
    .await;

    let client = reqwest::Client::new();
    let reply = client
        .get(format!("{}/api/test-tunnel", relay))
        .send()
        .await
        .unwrap();

    assert_eq!(reply.status().as_u16(), 200);
    let body: Value = reply.json().await.unwrap();
    assert_eq!(body["status"], "error");
}
