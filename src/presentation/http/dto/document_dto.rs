use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Document;

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub chatbot_id: Uuid,
    pub file_name: String,
    pub byte_size: i64,
    pub mime_type: String,
    pub chunk_count: i32,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            chatbot_id: document.chatbot_id(),
            file_name: document.file_name().to_string(),
            byte_size: document.byte_size(),
            mime_type: document.mime_type().to_string(),
            chunk_count: document.chunk_count(),
            status: document.status().as_str().to_string(),
            error_message: document.error_message().map(|e| e.to_string()),
            created_at: document.created_at().to_rfc3339(),
            updated_at: document.updated_at().to_rfc3339(),
        }
    }
}

/// Upload acknowledgment: the document is accepted in `pending` state and
/// processed in the background; poll the document for the outcome.
#[derive(Debug, Serialize)]
pub struct UploadAcceptedDto {
    pub document: DocumentResponseDto,
    pub job_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentResponseDto>,
}
