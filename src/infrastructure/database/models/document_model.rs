use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::value_objects::DocumentStatus;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub chatbot_id: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub byte_size: i64,
    pub mime_type: String,
    pub content_hash: Option<String>,
    pub chunk_count: i32,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Option<Uuid>,
    pub chatbot_id: Uuid,
    pub file_name: String,
    pub storage_key: String,
    pub byte_size: i64,
    pub mime_type: String,
    pub content_hash: Option<String>,
    pub chunk_count: i32,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: Some(document.id()),
            chatbot_id: document.chatbot_id(),
            file_name: document.file_name().to_string(),
            storage_key: document.storage_key().to_string(),
            byte_size: document.byte_size(),
            mime_type: document.mime_type().to_string(),
            content_hash: document.content_hash().map(|h| h.to_string()),
            chunk_count: document.chunk_count(),
            status: document.status().as_str().to_string(),
            error_message: document.error_message().map(|e| e.to_string()),
            created_at: document.created_at(),
            updated_at: document.updated_at(),
            deleted_at: document.deleted_at(),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let status = DocumentStatus::from_parts(&model.status, model.error_message.as_deref())?;

        Ok(Document::from_database(
            model.id,
            model.chatbot_id,
            model.file_name,
            model.storage_key,
            model.byte_size,
            model.mime_type,
            model.content_hash,
            model.chunk_count,
            status,
            model.created_at,
            model.updated_at,
            model.deleted_at,
        ))
    }
}
