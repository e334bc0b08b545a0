use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::{Message, Role};

/// An in-memory chat session: an append-only message list plus the flag
/// gating submissions while a model call is in flight. Every conversation
/// starts with one seeded assistant greeting; "start fresh" replaces the
/// whole value rather than mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<Message>,
    pub busy: bool,
    pub created_at: DateTime<Utc>,
    next_message_id: u64,
}

impl Conversation {
    pub fn seeded(greeting: &str) -> Self {
        let mut conversation = Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            busy: false,
            created_at: Utc::now(),
            next_message_id: 1,
        };
        let id = conversation.next_id();
        conversation.push(Message::new(id, Role::Assistant, greeting));
        conversation
    }

    /// Issue the next message id. Ids are unique and strictly increasing
    /// within a conversation.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_conversation() {
        let conv = Conversation::seeded("hello");
        assert_eq!(conv.messages.len(), 1);
        assert_eq!(conv.messages[0].role, Role::Assistant);
        assert_eq!(conv.messages[0].content, "hello");
        assert!(!conv.busy);
    }

    #[test]
    fn test_ids_monotonic() {
        let mut conv = Conversation::seeded("hi");
        let a = conv.next_id();
        let b = conv.next_id();
        assert!(conv.messages[0].id < a);
        assert!(a < b);
    }
}
