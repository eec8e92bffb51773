//! Prompt formatting for generate-style APIs.

use plume_chat::{Message, Role};

/// Flatten a message list into a single prompt for `/api/generate`.
///
/// Turns become `Human:` / `Assistant:` paragraphs, terminated by a bare
/// `Assistant:` so the model continues the conversation.
pub fn format_generate_prompt(messages: &[Message]) -> String {
    let turns: Vec<String> = messages
        .iter()
        .map(|m| match m.role {
            Role::User => format!("Human: {}", m.content),
            Role::Assistant => format!("Assistant: {}", m.content),
        })
        .collect();

    format!("{}\n\nAssistant:", turns.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_user_message() {
        let prompt = format_generate_prompt(&[Message::user("hello")]);
        assert_eq!(prompt, "Human: hello\n\nAssistant:");
    }

    #[test]
    fn test_multi_turn() {
        let prompt = format_generate_prompt(&[
            Message::user("hello"),
            Message::assistant("hi there"),
            Message::user("how are you?"),
        ]);
        assert_eq!(
            prompt,
            "Human: hello\n\nAssistant: hi there\n\nHuman: how are you?\n\nAssistant:"
        );
    }
}
