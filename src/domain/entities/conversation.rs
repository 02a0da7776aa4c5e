use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// An ordered exchange between one anonymous visitor and one chatbot. Grows
/// by a user/assistant pair per successful turn; the metadata carries the
/// source citations that grounded the latest assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: Uuid,
    chatbot_id: Uuid,
    visitor_id: String,
    messages: Vec<Message>,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(chatbot_id: Uuid, visitor_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            chatbot_id,
            visitor_id,
            messages: Vec::new(),
            metadata: serde_json::json!({}),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a conversation from persisted columns.
    pub fn from_database(
        id: Uuid,
        chatbot_id: Uuid,
        visitor_id: String,
        messages: Vec<Message>,
        metadata: serde_json::Value,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            chatbot_id,
            visitor_id,
            messages,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chatbot_id(&self) -> Uuid {
        self.chatbot_id
    }

    pub fn visitor_id(&self) -> &str {
        &self.visitor_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Append one completed turn: the visitor's message and the assistant's
    /// reply, plus the citations that grounded the reply.
    pub fn append_turn(&mut self, user_content: String, assistant_content: String, sources: Vec<String>) {
        self.messages.push(Message {
            role: MessageRole::User,
            content: user_content,
        });
        self.messages.push(Message {
            role: MessageRole::Assistant,
            content: assistant_content,
        });
        if !self.metadata.is_object() {
            self.metadata = serde_json::json!({});
        }
        self.metadata["sources"] = serde_json::json!(sources);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_grow_in_pairs() {
        let mut conversation = Conversation::new(Uuid::new_v4(), "visitor-1".to_string());
        assert!(conversation.messages().is_empty());

        conversation.append_turn(
            "What is the refund policy?".to_string(),
            "Refunds are available within 30 days.".to_string(),
            vec!["policy.pdf".to_string()],
        );
        assert_eq!(conversation.messages().len(), 2);

        conversation.append_turn(
            "And after 30 days?".to_string(),
            "Store credit only.".to_string(),
            vec!["policy.pdf".to_string()],
        );
        assert_eq!(conversation.messages().len(), 4);

        assert_eq!(conversation.messages()[0].role, MessageRole::User);
        assert_eq!(conversation.messages()[1].role, MessageRole::Assistant);
        assert_eq!(conversation.messages()[2].role, MessageRole::User);
        assert_eq!(conversation.messages()[3].role, MessageRole::Assistant);
    }

    #[test]
    fn test_metadata_carries_latest_sources() {
        let mut conversation = Conversation::new(Uuid::new_v4(), "visitor-1".to_string());

        conversation.append_turn(
            "q".to_string(),
            "a".to_string(),
            vec!["faq.docx".to_string(), "manual.pdf".to_string()],
        );

        assert_eq!(
            conversation.metadata()["sources"],
            serde_json::json!(["faq.docx", "manual.pdf"])
        );
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        let message = Message {
            role: MessageRole::Assistant,
            content: "hi".to_string(),
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["role"], "assistant");
    }
}
