use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, DocumentRepository, DocumentRepositoryError,
};

#[derive(Debug)]
pub enum DeleteDocumentError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for DeleteDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteDocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            DeleteDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteDocumentError {}

impl From<DocumentRepositoryError> for DeleteDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        DeleteDocumentError::RepositoryError(error.to_string())
    }
}

impl From<ChatbotRepositoryError> for DeleteDocumentError {
    fn from(error: ChatbotRepositoryError) -> Self {
        DeleteDocumentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDocumentRequest {
    pub workspace_id: Uuid,
    pub document_id: Uuid,
}

/// Soft delete only. The document's vectors stay in the chatbot's namespace
/// until the chatbot itself is deleted; the vector store exposes no
/// per-document deletion.
pub struct DeleteDocumentUseCase {
    documents: Arc<dyn DocumentRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
}

impl DeleteDocumentUseCase {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        chatbots: Arc<dyn ChatbotRepository>,
    ) -> Self {
        Self {
            documents,
            chatbots,
        }
    }

    pub async fn execute(&self, request: DeleteDocumentRequest) -> Result<(), DeleteDocumentError> {
        let mut document = self
            .documents
            .find_by_id(request.document_id)
            .await?
            .filter(|d| !d.is_deleted())
            .ok_or(DeleteDocumentError::NotFound(request.document_id))?;

        let owned = self
            .chatbots
            .find_by_id(document.chatbot_id())
            .await?
            .map(|c| c.belongs_to(request.workspace_id))
            .unwrap_or(false);

        if !owned {
            return Err(DeleteDocumentError::NotFound(request.document_id));
        }

        document.soft_delete();
        self.documents.update(&document).await?;

        Ok(())
    }
}
