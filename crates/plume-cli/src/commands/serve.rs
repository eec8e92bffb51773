//! HTTP relay command.

use std::net::SocketAddr;
use std::sync::Arc;

use plume_relay::{RelayConfig, RelayState};

pub(crate) async fn run(addr: SocketAddr) -> miette::Result<()> {
    let config = RelayConfig::from_env();

    println!("Relay listening on http://{}", addr);
    println!("  upstream: {}", config.upstream_url);
    match &config.tunnel_url {
        Some(url) => println!("  tunnel:   {}", url),
        None => println!("  tunnel:   (not set)"),
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| miette::miette!("Failed to bind {}: {}", addr, e))?;

    plume_relay::serve(listener, Arc::new(RelayState::new(config)))
        .await
        .map_err(|e| miette::miette!("Relay failed: {}", e))
}
