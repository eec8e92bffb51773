//! The provider abstraction the fallback chain iterates over.

use async_trait::async_trait;
use plume_chat::{ChatRequest, ChatResponse};

use crate::error::ProviderError;

/// An upstream service that can answer a chat request.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to answer the request.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;
}
