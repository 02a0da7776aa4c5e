use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Chatbot;

#[derive(Debug)]
pub enum ChatbotRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChatbotRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatbotRepositoryError::NotFound(id) => write!(f, "Chatbot not found: {}", id),
            ChatbotRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChatbotRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ChatbotRepositoryError {}

#[async_trait]
pub trait ChatbotRepository: Send + Sync {
    async fn save(&self, chatbot: &Chatbot) -> Result<Uuid, ChatbotRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>, ChatbotRepositoryError>;

    /// Non-deleted chatbots of one workspace, newest first.
    async fn find_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<Chatbot>, ChatbotRepositoryError>;

    async fn update(&self, chatbot: &Chatbot) -> Result<(), ChatbotRepositoryError>;
}
