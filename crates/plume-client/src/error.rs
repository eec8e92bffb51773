//! Error types for provider calls.

use thiserror::Error;

/// Errors from a provider attempt.
///
/// These never reach the end user directly: the fallback chain logs them
/// and moves on to the next candidate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned a non-2xx status.
    #[error("API error: {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider requires an API key that is not configured.
    #[error("missing API key for {0}")]
    MissingApiKey(&'static str),

    /// API key contains characters not valid in a header value.
    #[error("invalid API key for {0}")]
    InvalidApiKey(&'static str),

    /// Ollama server is not reachable.
    #[error("Ollama server not running at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),

    /// Requested model is not installed on the server.
    #[error("model '{0}' not found. Pull it with: ollama pull {0}")]
    ModelNotFound(String),

    /// Provider answered without any reply content.
    #[error("empty reply from {0}")]
    EmptyReply(&'static str),

    /// Request contains no messages to send.
    #[error("request has no messages")]
    EmptyRequest,
}
