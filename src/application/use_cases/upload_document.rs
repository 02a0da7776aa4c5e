use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::application::ports::{
    BlobStorage, BlobStorageError, IngestionQueue, IngestionQueueError, QueuedIngestion,
};
use crate::domain::entities::{Document, IngestionJob};
use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, DocumentRepository, DocumentRepositoryError,
    IngestionJobRepository, IngestionJobRepositoryError,
};

#[derive(Debug)]
pub enum UploadDocumentError {
    ChatbotNotFound(Uuid),
    ValidationError(String),
    StorageError(String),
    RepositoryError(String),
    QueueError(String),
}

impl std::fmt::Display for UploadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentError::ChatbotNotFound(id) => write!(f, "Chatbot not found: {}", id),
            UploadDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            UploadDocumentError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            UploadDocumentError::QueueError(msg) => write!(f, "Queue error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentError {}

impl From<BlobStorageError> for UploadDocumentError {
    fn from(error: BlobStorageError) -> Self {
        UploadDocumentError::StorageError(error.to_string())
    }
}

impl From<ChatbotRepositoryError> for UploadDocumentError {
    fn from(error: ChatbotRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

impl From<DocumentRepositoryError> for UploadDocumentError {
    fn from(error: DocumentRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

impl From<IngestionJobRepositoryError> for UploadDocumentError {
    fn from(error: IngestionJobRepositoryError) -> Self {
        UploadDocumentError::RepositoryError(error.to_string())
    }
}

impl From<IngestionQueueError> for UploadDocumentError {
    fn from(error: IngestionQueueError) -> Self {
        UploadDocumentError::QueueError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub workspace_id: Uuid,
    pub chatbot_id: Uuid,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentResponse {
    pub document: Document,
    pub job_id: Uuid,
}

/// Accepts an upload and acknowledges immediately: the raw bytes are made
/// durable, the document row is created `pending`, and an ingestion job is
/// persisted and enqueued. Extraction, chunking, and indexing all happen on
/// the worker pool; the caller polls the document record for the outcome.
pub struct UploadDocumentUseCase {
    chatbots: Arc<dyn ChatbotRepository>,
    documents: Arc<dyn DocumentRepository>,
    jobs: Arc<dyn IngestionJobRepository>,
    blobs: Arc<dyn BlobStorage>,
    queue: Arc<dyn IngestionQueue>,
}

impl UploadDocumentUseCase {
    pub fn new(
        chatbots: Arc<dyn ChatbotRepository>,
        documents: Arc<dyn DocumentRepository>,
        jobs: Arc<dyn IngestionJobRepository>,
        blobs: Arc<dyn BlobStorage>,
        queue: Arc<dyn IngestionQueue>,
    ) -> Self {
        Self {
            chatbots,
            documents,
            jobs,
            blobs,
            queue,
        }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentRequest,
    ) -> Result<UploadDocumentResponse, UploadDocumentError> {
        if request.data.is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "Uploaded file is empty".to_string(),
            ));
        }
        if request.file_name.trim().is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        let chatbot = self
            .chatbots
            .find_by_id(request.chatbot_id)
            .await?
            .filter(|c| c.belongs_to(request.workspace_id) && !c.is_deleted())
            .ok_or(UploadDocumentError::ChatbotNotFound(request.chatbot_id))?;

        let content_hash = format!("{:x}", Sha256::digest(&request.data));
        let blob = self.blobs.put(&request.data).await?;

        let mime_type = request
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let document = Document::new(
            chatbot.id(),
            request.file_name,
            blob.key,
            request.data.len() as i64,
            mime_type,
            Some(content_hash),
        );
        self.documents.save(&document).await?;

        let job = IngestionJob::new(document.id());
        self.jobs.save(&job).await?;
        self.queue.enqueue(QueuedIngestion {
            job_id: job.id(),
            document_id: document.id(),
        })?;

        tracing::info!(
            document_id = %document.id(),
            file_name = %document.file_name(),
            "Document accepted for ingestion"
        );

        Ok(UploadDocumentResponse {
            document,
            job_id: job.id(),
        })
    }
}
