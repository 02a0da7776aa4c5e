use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRepository, ChatbotRepositoryError};

#[derive(Debug)]
pub enum GetChatbotError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetChatbotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetChatbotError::NotFound(id) => write!(f, "Chatbot not found: {}", id),
            GetChatbotError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetChatbotError {}

impl From<ChatbotRepositoryError> for GetChatbotError {
    fn from(error: ChatbotRepositoryError) -> Self {
        GetChatbotError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetChatbotRequest {
    pub workspace_id: Uuid,
    pub chatbot_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetChatbotResponse {
    pub chatbot: Chatbot,
}

pub struct GetChatbotUseCase {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl GetChatbotUseCase {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn execute(
        &self,
        request: GetChatbotRequest,
    ) -> Result<GetChatbotResponse, GetChatbotError> {
        let chatbot = self
            .chatbots
            .find_by_id(request.chatbot_id)
            .await?
            .filter(|c| c.belongs_to(request.workspace_id) && !c.is_deleted())
            .ok_or(GetChatbotError::NotFound(request.chatbot_id))?;

        Ok(GetChatbotResponse { chatbot })
    }
}
