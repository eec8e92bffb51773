//! Relay configuration.

/// Default upstream Ollama URL.
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:11434";

/// Configuration for the relay endpoints.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL the generate proxy forwards to.
    pub upstream_url: String,
    /// Tunnel URL probed by the diagnostic endpoint.
    pub tunnel_url: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            tunnel_url: None,
        }
    }
}

impl RelayConfig {
    /// Create config from environment variables. All optional.
    pub fn from_env() -> Self {
        Self {
            upstream_url: std::env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            tunnel_url: std::env::var("OLLAMA_TUNNEL_URL")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert!(config.tunnel_url.is_none());
    }
}
