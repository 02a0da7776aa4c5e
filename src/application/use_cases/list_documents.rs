use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, DocumentRepository, DocumentRepositoryError,
};

#[derive(Debug)]
pub enum ListDocumentsError {
    ChatbotNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::ChatbotNotFound(id) => write!(f, "Chatbot not found: {}", id),
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

impl From<DocumentRepositoryError> for ListDocumentsError {
    fn from(error: DocumentRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

impl From<ChatbotRepositoryError> for ListDocumentsError {
    fn from(error: ChatbotRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListDocumentsRequest {
    pub workspace_id: Uuid,
    pub chatbot_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListDocumentsResponse {
    pub documents: Vec<Document>,
}

pub struct ListDocumentsUseCase {
    documents: Arc<dyn DocumentRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        chatbots: Arc<dyn ChatbotRepository>,
    ) -> Self {
        Self {
            documents,
            chatbots,
        }
    }

    pub async fn execute(
        &self,
        request: ListDocumentsRequest,
    ) -> Result<ListDocumentsResponse, ListDocumentsError> {
        self.chatbots
            .find_by_id(request.chatbot_id)
            .await?
            .filter(|c| c.belongs_to(request.workspace_id) && !c.is_deleted())
            .ok_or(ListDocumentsError::ChatbotNotFound(request.chatbot_id))?;

        let documents = self.documents.find_by_chatbot(request.chatbot_id).await?;

        Ok(ListDocumentsResponse { documents })
    }
}
