//! Ollama API client.
//!
//! Talks to the `/api/generate` endpoint of a local or tunneled Ollama
//! server. The same client type backs both the direct provider and the
//! tunnel provider; only the base URL and log label differ.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use plume_chat::{ChatRequest, ChatResponse, Usage};

use crate::config::ClientConfig;
use crate::error::ProviderError;
use crate::prompt::format_generate_prompt;
use crate::provider::Provider;
use crate::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_TEMPERATURE};

/// Ollama API client.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    label: &'static str,
}

/// Request to the Ollama generate API.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

/// Ollama generation options.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: i32,
}

/// Response from the Ollama generate API.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
    #[serde(default)]
    error: Option<String>,
}

/// Response from the Ollama tags API (list models).
#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

impl OllamaClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            label: "ollama",
        }
    }

    /// Create a client with custom URL and model.
    pub fn with_config(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            ..Self::new()
        }
    }

    /// Create a client for the direct local endpoint from [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.ollama_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            ..Self::new()
        }
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the log label (e.g. `"tunnel"` for the tunneled instance).
    pub fn labeled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// List models advertised by the server.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let tags_url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&tags_url)
            .send()
            .await
            .map_err(|_| ProviderError::ServerNotRunning(self.base_url.clone()))?;

        if !response.status().is_success() {
            return Err(ProviderError::ServerNotRunning(self.base_url.clone()));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// True if the configured model (or any tag of its base name) is in
    /// `models`.
    pub fn model_installed(&self, models: &[String]) -> bool {
        let model_base = self.model.split(':').next().unwrap_or(&self.model);
        models
            .iter()
            .any(|m| m == &self.model || m.starts_with(&format!("{}:", model_base)))
    }

    /// Check that the server is running and the model is available.
    pub async fn check_availability(&self) -> Result<(), ProviderError> {
        let models = self.list_models().await?;
        if !self.model_installed(&models) {
            return Err(ProviderError::ModelNotFound(self.model.clone()));
        }
        Ok(())
    }

    /// Send a prompt to the generate endpoint.
    async fn generate(
        &self,
        model: String,
        prompt: String,
        temperature: f32,
        num_predict: i32,
    ) -> Result<GenerateResponse, ProviderError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature,
                num_predict,
            },
        };

        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ServerNotRunning(self.base_url.clone())
                } else {
                    ProviderError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let response: GenerateResponse = response.json().await?;

        if let Some(error) = response.error {
            return Err(ProviderError::Api {
                status: 200,
                message: error,
            });
        }

        Ok(response)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for OllamaClient {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let prompt = format_generate_prompt(&request.messages);
        let model = request.model.clone().unwrap_or_else(|| self.model.clone());
        let temperature = request.temperature.unwrap_or(self.temperature);
        let num_predict = request.max_tokens.unwrap_or(self.max_tokens) as i32;

        let reply = self.generate(model, prompt, temperature, num_predict).await?;

        let usage = Usage::new(
            reply.prompt_eval_count.unwrap_or(0),
            reply.eval_count.unwrap_or(0),
        );

        Ok(ChatResponse::assistant(reply.response).with_usage(usage))
    }
}
