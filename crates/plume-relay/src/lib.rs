//! # Plume relay
//!
//! A small HTTP relay in front of an Ollama server, for deployments where
//! the browser or client cannot reach Ollama directly:
//!
//! - `POST /api/ollama` forwards an arbitrary JSON body to the upstream
//!   generate endpoint and returns the upstream JSON unchanged. Any
//!   failure becomes a fixed 500 error body.
//! - `GET /api/test-tunnel` probes the tunnel's list-models endpoint and
//!   reports reachability as JSON (always HTTP 200).

mod config;
mod routes;

use std::sync::Arc;

use tracing::info;

pub use config::RelayConfig;
pub use routes::{build_router, RelayState, RELAY_ERROR_MESSAGE};

/// Serve the relay on an already-bound listener.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<RelayState>,
) -> std::io::Result<()> {
    info!("relay listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await
}
