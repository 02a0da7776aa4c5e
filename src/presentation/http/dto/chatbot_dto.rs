use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Chatbot;

#[derive(Debug, Deserialize)]
pub struct CreateChatbotDto {
    pub name: String,
    #[serde(default)]
    pub system_prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct ChatbotResponseDto {
    pub id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub namespace: String,
    pub created_at: String,
}

impl From<Chatbot> for ChatbotResponseDto {
    fn from(chatbot: Chatbot) -> Self {
        Self {
            id: chatbot.id(),
            name: chatbot.name().to_string(),
            system_prompt: chatbot.system_prompt().to_string(),
            model: chatbot.model().to_string(),
            temperature: chatbot.temperature(),
            namespace: chatbot.namespace().as_str().to_string(),
            created_at: chatbot.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatbotListResponseDto {
    pub chatbots: Vec<ChatbotResponseDto>,
}
