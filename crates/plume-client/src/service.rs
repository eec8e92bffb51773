//! The provider fallback sequence.

use tracing::{debug, info, warn};

use plume_chat::{ChatRequest, ChatResponse};

use crate::anthropic::AnthropicClient;
use crate::config::ClientConfig;
use crate::demo::DemoResponder;
use crate::huggingface::HuggingFaceClient;
use crate::ollama::OllamaClient;
use crate::openai::OpenAiClient;
use crate::provider::Provider;

/// Fixed reply when the direct local endpoint is unreachable.
pub const LOCAL_APOLOGY: &str = "Sorry, I couldn't reach the Ollama server. Make sure it is running on http://127.0.0.1:11434 (start it with `ollama serve`) and try again.";

/// Sends chat requests through an ordered list of providers.
///
/// A linear decision list: each candidate either returns a reply or is
/// skipped, first success wins. There is no retry, no backoff, and no
/// shared state between calls.
pub struct ChatService {
    providers: Vec<Box<dyn Provider>>,
    demo: DemoResponder,
    hosted: bool,
}

impl ChatService {
    /// Build the chain for the given configuration.
    ///
    /// Local mode uses the direct Ollama endpoint only. Hosted mode uses
    /// the tunnel (if configured) and then each hosted provider with a
    /// configured key; providers without credentials are skipped here
    /// rather than failing at request time.
    pub fn new(config: &ClientConfig) -> Self {
        let mut providers: Vec<Box<dyn Provider>> = Vec::new();

        if config.hosted {
            if let Some(url) = &config.tunnel_url {
                providers.push(Box::new(
                    OllamaClient::from_config(config)
                        .with_url(url.clone())
                        .labeled("tunnel"),
                ));
            }
            if let Ok(client) = OpenAiClient::from_config(config) {
                providers.push(Box::new(client));
            }
            if let Ok(client) = AnthropicClient::from_config(config) {
                providers.push(Box::new(client));
            }
            if let Ok(client) = HuggingFaceClient::from_config(config) {
                providers.push(Box::new(client));
            }
        } else {
            providers.push(Box::new(OllamaClient::from_config(config)));
        }

        debug!(
            "chat service with {} provider(s), hosted={}",
            providers.len(),
            config.hosted
        );

        Self {
            providers,
            demo: DemoResponder::new(),
            hosted: config.hosted,
        }
    }

    /// Build a service with an explicit provider chain.
    pub fn with_chain(providers: Vec<Box<dyn Provider>>, hosted: bool) -> Self {
        Self {
            providers,
            demo: DemoResponder::new(),
            hosted,
        }
    }

    /// Names of the configured providers, in attempt order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Send a request through the chain. Never fails.
    pub async fn send(&self, request: &ChatRequest) -> ChatResponse {
        for provider in &self.providers {
            debug!("trying provider: {}", provider.name());
            match provider.send(request).await {
                Ok(response) => {
                    info!("reply from {}", provider.name());
                    return response;
                }
                Err(e) => {
                    warn!("provider {} failed: {}", provider.name(), e);
                }
            }
        }

        if self.hosted {
            info!("all providers failed, using demo responder");
            self.demo.respond(request)
        } else {
            info!("local Ollama unreachable, returning apology");
            ChatResponse::assistant(LOCAL_APOLOGY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DEMO_FALLBACK;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use plume_chat::Message;

    struct StubProvider {
        name: &'static str,
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn send(&self, _request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
            match self.reply {
                Some(text) => Ok(ChatResponse::assistant(text)),
                None => Err(ProviderError::EmptyReply(self.name)),
            }
        }
    }

    fn request() -> ChatRequest {
        ChatRequest::new(vec![Message::user("what is rust?")])
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let service = ChatService::with_chain(
            vec![
                Box::new(StubProvider {
                    name: "first",
                    reply: Some("from first"),
                }),
                Box::new(StubProvider {
                    name: "second",
                    reply: Some("from second"),
                }),
            ],
            true,
        );

        let reply = service.send(&request()).await;
        assert_eq!(reply.message.content, "from first");
    }

    #[tokio::test]
    async fn test_failure_advances_to_next() {
        let service = ChatService::with_chain(
            vec![
                Box::new(StubProvider {
                    name: "broken",
                    reply: None,
                }),
                Box::new(StubProvider {
                    name: "working",
                    reply: Some("recovered"),
                }),
            ],
            true,
        );

        let reply = service.send(&request()).await;
        assert_eq!(reply.message.content, "recovered");
    }

    #[tokio::test]
    async fn test_all_fail_hosted_yields_demo_string() {
        let service = ChatService::with_chain(
            vec![
                Box::new(StubProvider {
                    name: "a",
                    reply: None,
                }),
                Box::new(StubProvider {
                    name: "b",
                    reply: None,
                }),
            ],
            true,
        );

        let reply = service.send(&request()).await;
        assert_eq!(reply.message.content, DEMO_FALLBACK);
    }

    #[tokio::test]
    async fn test_all_fail_local_yields_apology() {
        let service = ChatService::with_chain(
            vec![Box::new(StubProvider {
                name: "ollama",
                reply: None,
            })],
            false,
        );

        let reply = service.send(&request()).await;
        assert_eq!(reply.message.content, LOCAL_APOLOGY);
    }

    #[tokio::test]
    async fn test_empty_hosted_chain_yields_demo() {
        let service = ChatService::with_chain(vec![], true);
        let reply = service.send(&request()).await;
        assert_eq!(reply.message.content, DEMO_FALLBACK);
    }

    #[test]
    fn test_chain_construction_skips_unconfigured() {
        let config = ClientConfig::builder()
            .hosted(true)
            .tunnel_url("https://tunnel.example.com")
            .openai_api_key("sk-test")
            .build();

        let service = ChatService::new(&config);
        assert_eq!(service.provider_names(), vec!["tunnel", "openai"]);
    }

    #[test]
    fn test_local_chain_is_direct_ollama_only() {
        let service = ChatService::new(&ClientConfig::default());
        assert_eq!(service.provider_names(), vec!["ollama"]);
    }
}
