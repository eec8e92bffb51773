//! OpenAI chat completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use plume_chat::{ChatRequest, ChatResponse, Usage};

use crate::config::ClientConfig;
use crate::error::ProviderError;
use crate::provider::Provider;
use crate::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI API client.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

/// Request to the chat completions API.
#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey("openai"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    /// Create a client from [`ClientConfig`], failing without a key.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderError> {
        let key = config
            .openai_api_key
            .clone()
            .ok_or(ProviderError::MissingApiKey("openai"))?;
        let mut client = Self::new(key)?;
        client.temperature = config.temperature;
        client.max_tokens = config.max_tokens;
        Ok(client)
    }
}

#[async_trait]
impl Provider for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
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

        let body = CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
            temperature: request.temperature.unwrap_or(self.temperature),
        };

        let response = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let reply: CompletionResponse = response.json().await?;
        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or(ProviderError::EmptyReply("openai"))?;

        let mut result = ChatResponse::assistant(choice.message.content);
        if let Some(usage) = reply.usage {
            result = result.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let result = OpenAiClient::new("");
        assert!(matches!(result, Err(ProviderError::MissingApiKey("openai"))));
    }

    #[test]
    fn test_from_config_without_key() {
        let config = ClientConfig::default();
        assert!(OpenAiClient::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_with_key() {
        let config = ClientConfig::builder()
            .openai_api_key("sk-test")
            .temperature(0.2)
            .build();
        let client = OpenAiClient::from_config(&config).unwrap();
        assert_eq!(client.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(client.temperature, 0.2);
    }
}
