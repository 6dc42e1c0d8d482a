//! Append-only conversation store

use crate::persona::GREETING;
use crate::state::ChatMessage;

/// Ordered sequence of exchanged messages. Insertion order is display order;
/// nothing is ever edited or removed once appended.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript that opens with the assistant greeting
    pub fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChatRole;

    #[test]
    fn test_seeded_starts_with_single_greeting() {
        let transcript = Transcript::seeded();
        assert_eq!(transcript.len(), 1);
        let first = transcript.last().unwrap();
        assert_eq!(first.role, ChatRole::Assistant);
        assert_eq!(first.content, GREETING);
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut transcript = Transcript::seeded();
        transcript.push(ChatMessage::visitor("first"));
        transcript.push(ChatMessage::assistant("second"));

        let contents: Vec<&str> = transcript.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![GREETING, "first", "second"]);
    }
}
