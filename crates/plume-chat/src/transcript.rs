//! In-memory session transcript.

use crate::message::Message;

/// Maximum number of messages kept in a transcript by default.
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 100;

/// Bounded message history for one chat session.
///
/// When the capacity is exceeded the oldest messages are dropped. The
/// transcript lives in memory only and is discarded when the session ends.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    capacity: usize,
}

impl Transcript {
    /// Create an empty transcript with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRANSCRIPT_CAPACITY)
    }

    /// Create an empty transcript holding at most `capacity` messages.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a message, dropping the oldest if the transcript is full.
    pub fn push(&mut self, message: Message) {
        if self.messages.len() == self.capacity {
            self.messages.remove(0);
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.push(Message::user("hello"));
        transcript.push(Message::assistant("hi"));
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "hello");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut transcript = Transcript::with_capacity(2);
        transcript.push(Message::user("one"));
        transcript.push(Message::user("two"));
        transcript.push(Message::user("three"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].content, "two");
        assert_eq!(transcript.messages()[1].content, "three");
    }
}
