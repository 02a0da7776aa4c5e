use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::value_objects::Namespace;
use crate::infrastructure::database::schema::chatbots;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = chatbots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatbotModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub namespace: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = chatbots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatbotModel {
    pub id: Option<Uuid>,
    pub workspace_id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub namespace: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Chatbot> for NewChatbotModel {
    fn from(chatbot: &Chatbot) -> Self {
        Self {
            id: Some(chatbot.id()),
            workspace_id: chatbot.workspace_id(),
            name: chatbot.name().to_string(),
            system_prompt: chatbot.system_prompt().to_string(),
            model: chatbot.model().to_string(),
            temperature: chatbot.temperature(),
            namespace: chatbot.namespace().as_str().to_string(),
            created_at: chatbot.created_at(),
            deleted_at: chatbot.deleted_at(),
        }
    }
}

impl TryFrom<ChatbotModel> for Chatbot {
    type Error = String;

    fn try_from(model: ChatbotModel) -> Result<Self, Self::Error> {
        let namespace = Namespace::from_value(model.namespace)
            .map_err(|e| format!("Invalid namespace: {}", e))?;

        Ok(Chatbot::from_database(
            model.id,
            model.workspace_id,
            model.name,
            model.system_prompt,
            model.model,
            model.temperature,
            namespace,
            model.created_at,
            model.deleted_at,
        ))
    }
}
