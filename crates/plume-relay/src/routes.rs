//! Relay route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error};

use crate::config::RelayConfig;

/// Fixed error body returned when the generate proxy fails.
pub const RELAY_ERROR_MESSAGE: &str =
    "Failed to connect to the Ollama API. Make sure Ollama is running on http://127.0.0.1:11434";

/// Shared state for the relay handlers.
pub struct RelayState {
    http: reqwest::Client,
    config: RelayConfig,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Debug, Error)]
enum RelayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
}

/// Build the relay router.
pub fn build_router(state: Arc<RelayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/ollama", post(relay_generate))
        .route("/api/test-tunnel", get(probe_tunnel))
        .layer(cors)
        .with_state(state)
}

/// Forward an arbitrary JSON body to the upstream generate endpoint.
///
/// The upstream JSON is returned unchanged on success; every failure maps
/// to a fixed 500 error body.
async fn relay_generate(
    State(state): State<Arc<RelayState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let url = format!("{}/api/generate", state.config.upstream_url);
    debug!("relaying generate request to {}", url);

    match forward(&state, &url, body).await {
        Ok(reply) => (StatusCode::OK, Json(reply)),
        Err(e) => {
            error!("relay to {} failed: {}", url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": RELAY_ERROR_MESSAGE })),
            )
        }
    }
}

async fn forward(state: &RelayState, url: &str, body: Value) -> Result<Value, RelayError> {
    let response = state.http.post(url).json(&body).send().await?;

    if !response.status().is_success() {
        return Err(RelayError::UpstreamStatus(response.status().as_u16()));
    }

    Ok(response.json().await?)
}

/// Probe the tunnel's list-models endpoint and report reachability.
///
/// Always answers HTTP 200; the JSON `status` field carries the outcome.
async fn probe_tunnel(State(state): State<Arc<RelayState>>) -> Json<Value> {
    let Some(tunnel_url) = &state.config.tunnel_url else {
        return Json(json!({
            "error": "OLLAMA_TUNNEL_URL not defined",
            "status": "error",
        }));
    };

    let url = format!("{}/api/tags", tunnel_url);
    debug!("probing tunnel at {}", url);

    match state.http.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            let models_count = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("models").and_then(Value::as_array).map(Vec::len))
                .unwrap_or(0);

            Json(json!({
                "message": "Tunnel accessible",
                "tunnelUrl": tunnel_url,
                "modelsCount": models_count,
                "status": "success",
            }))
        }
        Ok(response) => Json(json!({
            "error": format!("Tunnel not accessible: {}", response.status()),
            "tunnelUrl": tunnel_url,
            "status": "error",
        })),
        Err(e) => Json(json!({
            "error": e.to_string(),
            "status": "error",
        })),
    }
}
