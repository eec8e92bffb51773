//! # Plume client
//!
//! Provider clients and the fallback chain that turns a chat request into
//! an assistant reply.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ ChatRequest │ --> │   ChatService    │ --> │ ChatResponse │
//! └─────────────┘     │ (fallback chain) │     └──────────────┘
//!                     └────────┬─────────┘
//!                              │
//!         ollama → tunnel → openai → anthropic → huggingface → demo
//! ```
//!
//! Each provider either returns a normalized [`plume_chat::ChatResponse`]
//! or fails; failures are logged and the next candidate is tried. The chain
//! never returns an error: the final fallback is a canned reply.

mod anthropic;
mod config;
mod demo;
mod error;
mod huggingface;
mod ollama;
mod openai;
pub mod prompt;
mod provider;
mod service;

pub use anthropic::AnthropicClient;
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_OLLAMA_URL,
    DEFAULT_TEMPERATURE,
};
pub use demo::{DemoResponder, DEMO_FALLBACK};
pub use error::ProviderError;
pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use provider::Provider;
pub use service::{ChatService, LOCAL_APOLOGY};
