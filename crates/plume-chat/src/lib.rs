//! # Plume chat types
//!
//! Value types shared across the Plume crates: messages, request/response
//! parameter bags, and the in-memory session transcript.
//!
//! Messages are immutable once created and live only for the duration of a
//! session; there is no persistence layer.

mod message;
mod transcript;

pub use message::{ChatRequest, ChatResponse, Message, Role, Usage};
pub use transcript::{Transcript, DEFAULT_TRANSCRIPT_CAPACITY};
