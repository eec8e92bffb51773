//! Hugging Face inference API client.
//!
//! Last-resort hosted provider: sends only the latest user message to a
//! small conversational model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use plume_chat::{ChatRequest, ChatResponse};

use crate::config::ClientConfig;
use crate::error::ProviderError;
use crate::provider::Provider;
use crate::DEFAULT_TEMPERATURE;

const HF_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";

/// Hugging Face inference client.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_key: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    temperature: f32,
}

/// The inference API returns either a bare object or a one-element array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generated>),
    One(Generated),
}

#[derive(Debug, Deserialize)]
struct Generated {
    #[serde(default)]
    generated_text: Option<String>,
}

impl HuggingFaceClient {
    /// Create a new client.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey("huggingface"));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Create a client from [`ClientConfig`], failing without a key.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderError> {
        let key = config
            .huggingface_api_key
            .clone()
            .ok_or(ProviderError::MissingApiKey("huggingface"))?;
        let mut client = Self::new(key)?;
        client.temperature = config.temperature;
        Ok(client)
    }
}

#[async_trait]
impl Provider for HuggingFaceClient {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let inputs = request
            .last_user_text()
            .ok_or(ProviderError::EmptyRequest)?
            .to_string();

        let body = InferenceRequest {
            inputs,
            parameters: InferenceParameters {
                max_length: 200,
                temperature: request.temperature.unwrap_or(self.temperature),
            },
        };

        let response = self
            .client
            .post(HF_INFERENCE_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let reply: InferenceResponse = response.json().await?;
        let generated = match reply {
            InferenceResponse::Many(items) => items.into_iter().next().and_then(|g| g.generated_text),
            InferenceResponse::One(item) => item.generated_text,
        };

        let text = generated.ok_or(ProviderError::EmptyReply("huggingface"))?;
        Ok(ChatResponse::assistant(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_chat::Message;

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            HuggingFaceClient::new(""),
            Err(ProviderError::MissingApiKey("huggingface"))
        ));
    }

    #[test]
    fn test_response_shapes_deserialize() {
        let many: InferenceResponse =
            serde_json::from_str(r#"[{"generated_text": "hi"}]"#).unwrap();
        assert!(matches!(many, InferenceResponse::Many(_)));

        let one: InferenceResponse = serde_json::from_str(r#"{"generated_text": "hi"}"#).unwrap();
        assert!(matches!(one, InferenceResponse::One(_)));
    }

    #[tokio::test]
    async fn test_empty_request_rejected() {
        let client = HuggingFaceClient::new("hf-test").unwrap();
        let request = ChatRequest::new(Vec::<Message>::new());
        let result = client.send(&request).await;
        assert!(matches!(result, Err(ProviderError::EmptyRequest)));
    }

    #[tokio::test]
    async fn test_assistant_only_request_rejected() {
        let client = HuggingFaceClient::new("hf-test").unwrap();
        let request = ChatRequest::new(vec![Message::assistant("earlier reply")]);
        let result = client.send(&request).await;
        assert!(matches!(result, Err(ProviderError::EmptyRequest)));
    }
}
