//! Canned replies used when no provider is reachable.

use plume_chat::{ChatRequest, ChatResponse};

use crate::error::ProviderError;
use crate::provider::Provider;
use async_trait::async_trait;

/// The default canned reply.
pub const DEMO_FALLBACK: &str = "Plume is running in demo mode: no language-model provider was reachable.\n\nTo get real replies:\n1. Install Ollama on your machine\n2. Start it with `ollama serve`\n3. Run `plume chat` again\n\nIn the meantime you can try the interface and the markdown rendering!";

const DEMO_GREETING: &str = "Hello! Plume is running in demo mode because no provider was reachable. Start Ollama locally with `ollama serve` to get full replies.";

const DEMO_CODE: &str = "Here is a small JavaScript example:\n\n```javascript\nfunction fibonacci(n) {\n  if (n <= 1) return n;\n  return fibonacci(n - 1) + fibonacci(n - 2);\n}\n\nfor (let i = 0; i < 10; i++) {\n  console.log(fibonacci(i));\n}\n```\n\n*Note: this is a canned demo reply. Run Ollama locally for real answers.*";

const DEMO_HELP: &str = "## Demo mode\n\nNo provider was reachable, so Plume is answering from canned replies. What still works:\n\n- The chat loop and transcript\n- Markdown formatting\n- Code block rendering\n\n### For real replies\n\n1. Install Ollama\n2. Run `ollama serve`\n3. Start `plume chat` again\n\n### Things to try\n\n- Ask for a code example\n- Test markdown formatting";

/// Hand-authored replies keyed on substrings of the last user message.
///
/// Always succeeds; this is the terminal entry of the fallback sequence.
#[derive(Debug, Default)]
pub struct DemoResponder;

impl DemoResponder {
    pub fn new() -> Self {
        Self
    }

    /// Pick a canned reply for the request.
    pub fn respond(&self, request: &ChatRequest) -> ChatResponse {
        let text = request.last_user_text().unwrap_or("").to_lowercase();

        let reply = if text.contains("hello") || text.contains("hey") {
            DEMO_GREETING
        } else if text.contains("code") || text.contains("program") {
            DEMO_CODE
        } else if text.contains("help") {
            DEMO_HELP
        } else {
            DEMO_FALLBACK
        };

        ChatResponse::assistant(reply)
    }
}

#[async_trait]
impl Provider for DemoResponder {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        Ok(self.respond(request))
    }
}
