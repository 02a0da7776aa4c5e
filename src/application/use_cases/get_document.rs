use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, DocumentRepository, DocumentRepositoryError,
};

#[derive(Debug)]
pub enum GetDocumentError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDocumentError::NotFound(id) => write!(f, "Document not found: {}", id),
            GetDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetDocumentError {}

impl From<DocumentRepositoryError> for GetDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        GetDocumentError::RepositoryError(error.to_string())
    }
}

impl From<ChatbotRepositoryError> for GetDocumentError {
    fn from(error: ChatbotRepositoryError) -> Self {
        GetDocumentError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetDocumentRequest {
    pub workspace_id: Uuid,
    pub document_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct GetDocumentResponse {
    pub document: Document,
}

/// Status poll for an upload: ownership is checked through the owning
/// chatbot, since documents carry no workspace column of their own.
pub struct GetDocumentUseCase {
    documents: Arc<dyn DocumentRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
}

impl GetDocumentUseCase {
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
        request: GetDocumentRequest,
    ) -> Result<GetDocumentResponse, GetDocumentError> {
        let document = self
            .documents
            .find_by_id(request.document_id)
            .await?
            .filter(|d| !d.is_deleted())
            .ok_or(GetDocumentError::NotFound(request.document_id))?;

        let owned = self
            .chatbots
            .find_by_id(document.chatbot_id())
            .await?
            .map(|c| c.belongs_to(request.workspace_id))
            .unwrap_or(false);

        if !owned {
            return Err(GetDocumentError::NotFound(request.document_id));
        }

        Ok(GetDocumentResponse { document })
    }
}
