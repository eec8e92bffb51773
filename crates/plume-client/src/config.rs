//! Client configuration.

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "llama3";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default reply token limit.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Configuration for the chat service and its providers.
///
/// Every field has a default; no environment variable is required.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the local Ollama server.
    pub ollama_url: String,
    /// Tunnel URL reaching a remote Ollama, if any.
    pub tunnel_url: Option<String>,
    /// Model name passed to generate-style APIs.
    pub model: String,
    /// Sampling temperature (0.0 - 1.0).
    pub temperature: f32,
    /// Token limit for replies (`num_predict` / `max_tokens`).
    pub max_tokens: u32,
    /// Hosted deployment: skip the direct local endpoint and use the
    /// tunnel + hosted-provider chain instead.
    pub hosted: bool,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            tunnel_url: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            hosted: false,
            openai_api_key: None,
            anthropic_api_key: None,
            huggingface_api_key: None,
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let ollama_url =
            std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());

        let model = std::env::var("PLUME_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let temperature = std::env::var("PLUME_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = std::env::var("PLUME_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let hosted = std::env::var("PLUME_HOSTED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            ollama_url,
            tunnel_url: env_opt("OLLAMA_TUNNEL_URL"),
            model,
            temperature,
            max_tokens,
            hosted,
            openai_api_key: env_opt("OPENAI_API_KEY"),
            anthropic_api_key: env_opt("ANTHROPIC_API_KEY"),
            huggingface_api_key: env_opt("HUGGINGFACE_API_KEY"),
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Read an optional environment variable, treating empty as unset.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn ollama_url(mut self, url: impl Into<String>) -> Self {
        self.config.ollama_url = url.into();
        self
    }

    pub fn tunnel_url(mut self, url: impl Into<String>) -> Self {
        self.config.tunnel_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = tokens;
        self
    }

    pub fn hosted(mut self, hosted: bool) -> Self {
        self.config.hosted = hosted;
        self
    }

    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai_api_key = Some(key.into());
        self
    }

    pub fn anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.anthropic_api_key = Some(key.into());
        self
    }

    pub fn huggingface_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.huggingface_api_key = Some(key.into());
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.ollama_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.hosted);
        assert!(config.tunnel_url.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .ollama_url("http://myserver:11434")
            .tunnel_url("https://tunnel.example.com")
            .model("mistral")
            .hosted(true)
            .build();

        assert_eq!(config.ollama_url, "http://myserver:11434");
        assert_eq!(config.tunnel_url.as_deref(), Some("https://tunnel.example.com"));
        assert_eq!(config.model, "mistral");
        assert!(config.hosted);
    }
}
