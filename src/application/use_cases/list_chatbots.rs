use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRepository, ChatbotRepositoryError};

#[derive(Debug)]
pub enum ListChatbotsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListChatbotsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListChatbotsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListChatbotsError {}

impl From<ChatbotRepositoryError> for ListChatbotsError {
    fn from(error: ChatbotRepositoryError) -> Self {
        ListChatbotsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListChatbotsRequest {
    pub workspace_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListChatbotsResponse {
    pub chatbots: Vec<Chatbot>,
}

pub struct ListChatbotsUseCase {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl ListChatbotsUseCase {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn execute(
        &self,
        request: ListChatbotsRequest,
    ) -> Result<ListChatbotsResponse, ListChatbotsError> {
        let chatbots = self.chatbots.find_by_workspace(request.workspace_id).await?;

        Ok(ListChatbotsResponse { chatbots })
    }
}
