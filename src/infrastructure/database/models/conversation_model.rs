use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Conversation, Message};
use crate::infrastructure::database::schema::conversations;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConversationModel {
    pub id: Uuid,
    pub chatbot_id: Uuid,
    pub visitor_id: String,
    pub messages: serde_json::Value,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewConversationModel {
    pub id: Option<Uuid>,
    pub chatbot_id: Uuid,
    pub visitor_id: String,
    pub messages: serde_json::Value,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Conversation> for NewConversationModel {
    type Error = String;

    fn try_from(conversation: &Conversation) -> Result<Self, Self::Error> {
        let messages = serde_json::to_value(conversation.messages())
            .map_err(|e| format!("Failed to serialize messages: {}", e))?;

        Ok(Self {
            id: Some(conversation.id()),
            chatbot_id: conversation.chatbot_id(),
            visitor_id: conversation.visitor_id().to_string(),
            messages,
            metadata: conversation.metadata().clone(),
            created_at: conversation.created_at(),
            updated_at: conversation.updated_at(),
        })
    }
}

impl TryFrom<ConversationModel> for Conversation {
    type Error = String;

    fn try_from(model: ConversationModel) -> Result<Self, Self::Error> {
        let messages: Vec<Message> = serde_json::from_value(model.messages)
            .map_err(|e| format!("Invalid message list: {}", e))?;

        Ok(Conversation::from_database(
            model.id,
            model.chatbot_id,
            model.visitor_id,
            messages,
            model.metadata,
            model.created_at,
            model.updated_at,
        ))
    }
}
