use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{VectorIndex, VectorIndexError};
use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, DocumentRepository, DocumentRepositoryError,
};

#[derive(Debug)]
pub enum DeleteChatbotError {
    NotFound(Uuid),
    RepositoryError(String),
    IndexError(String),
}

impl std::fmt::Display for DeleteChatbotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteChatbotError::NotFound(id) => write!(f, "Chatbot not found: {}", id),
            DeleteChatbotError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            DeleteChatbotError::IndexError(msg) => write!(f, "Vector index error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteChatbotError {}

impl From<ChatbotRepositoryError> for DeleteChatbotError {
    fn from(error: ChatbotRepositoryError) -> Self {
        DeleteChatbotError::RepositoryError(error.to_string())
    }
}

impl From<DocumentRepositoryError> for DeleteChatbotError {
    fn from(error: DocumentRepositoryError) -> Self {
        DeleteChatbotError::RepositoryError(error.to_string())
    }
}

impl From<VectorIndexError> for DeleteChatbotError {
    fn from(error: VectorIndexError) -> Self {
        DeleteChatbotError::IndexError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteChatbotRequest {
    pub workspace_id: Uuid,
    pub chatbot_id: Uuid,
}

/// Soft-deletes the chatbot and its documents, then purges the bot's whole
/// vector namespace. The purge is also the sweep that collects any orphaned
/// vectors left behind by failed ingestions.
pub struct DeleteChatbotUseCase {
    chatbots: Arc<dyn ChatbotRepository>,
    documents: Arc<dyn DocumentRepository>,
    index: Arc<dyn VectorIndex>,
}

impl DeleteChatbotUseCase {
    pub fn new(
        chatbots: Arc<dyn ChatbotRepository>,
        documents: Arc<dyn DocumentRepository>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            chatbots,
            documents,
            index,
        }
    }

    pub async fn execute(&self, request: DeleteChatbotRequest) -> Result<(), DeleteChatbotError> {
        let mut chatbot = self
            .chatbots
            .find_by_id(request.chatbot_id)
            .await?
            .filter(|c| c.belongs_to(request.workspace_id) && !c.is_deleted())
            .ok_or(DeleteChatbotError::NotFound(request.chatbot_id))?;

        for mut document in self.documents.find_by_chatbot(chatbot.id()).await? {
            document.soft_delete();
            self.documents.update(&document).await?;
        }

        chatbot.soft_delete();
        self.chatbots.update(&chatbot).await?;

        self.index.delete_namespace(chatbot.namespace()).await?;

        tracing::info!(chatbot_id = %chatbot.id(), "Chatbot deleted and namespace purged");
        Ok(())
    }
}
