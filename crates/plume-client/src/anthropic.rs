//! Anthropic messages API client.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use plume_chat::{ChatRequest, ChatResponse, Usage};

use crate::config::ClientConfig;
use crate::error::ProviderError;
use crate::provider::Provider;
use crate::DEFAULT_MAX_TOKENS;

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";

/// Anthropic API client.
pub struct AnthropicClient {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
}

/// Request to the messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Response from the messages API.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl AnthropicClient {
    /// Create a new client.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey("anthropic"));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&api_key)
                .map_err(|_| ProviderError::InvalidApiKey("anthropic"))?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Create a client from [`ClientConfig`], failing without a key.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderError> {
        let key = config
            .anthropic_api_key
            .clone()
            .ok_or(ProviderError::MissingApiKey("anthropic"))?;
        let mut client = Self::new(key)?;
        client.max_tokens = config.max_tokens;
        Ok(client)
    }
}

#[async_trait]
impl Provider for AnthropicClient {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.as_str(),
                content: m.content.clone(),
            })
            .collect();

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            messages,
        };

        let response = self
            .client
            .post(ANTHROPIC_MESSAGES_URL)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => String::new(),
            };
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = response.json().await?;

        // Reply text is spread over content blocks.
        let text = reply
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        let mut result = ChatResponse::assistant(text);
        if let Some(usage) = reply.usage {
            result = result.with_usage(Usage::new(usage.input_tokens, usage.output_tokens));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = AnthropicClient::new("");
        assert!(matches!(
            result,
            Err(ProviderError::MissingApiKey("anthropic"))
        ));
    }

    #[test]
    fn test_invalid_api_key() {
        let result = AnthropicClient::new("bad\nkey");
        assert!(matches!(
            result,
            Err(ProviderError::InvalidApiKey("anthropic"))
        ));
    }

    #[test]
    fn test_from_config_with_key() {
        let config = ClientConfig::builder()
            .anthropic_api_key("test-key")
            .max_tokens(1024)
            .build();
        let client = AnthropicClient::from_config(&config).unwrap();
        assert_eq!(client.model, DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(client.max_tokens, 1024);
    }
}
