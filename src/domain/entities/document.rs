use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DocumentStatus;

/// One uploaded knowledge-base file belonging to a chatbot.
///
/// Created `pending` at upload time with a zero chunk count; the ingestion
/// worker drives it through `processing` to exactly one terminal state.
/// Invariant: `chunk_count > 0` iff the document completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    chatbot_id: Uuid,
    file_name: String,
    storage_key: String,
    byte_size: i64,
    mime_type: String,
    content_hash: Option<String>,
    chunk_count: i32,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(
        chatbot_id: Uuid,
        file_name: String,
        storage_key: String,
        byte_size: i64,
        mime_type: String,
        content_hash: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            chatbot_id,
            file_name,
            storage_key,
            byte_size,
            mime_type,
            content_hash,
            chunk_count: 0,
            status: DocumentStatus::Pending,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Rebuild a document from persisted columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        chatbot_id: Uuid,
        file_name: String,
        storage_key: String,
        byte_size: i64,
        mime_type: String,
        content_hash: Option<String>,
        chunk_count: i32,
        status: DocumentStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            chatbot_id,
            file_name,
            storage_key,
            byte_size,
            mime_type,
            content_hash,
            chunk_count,
            status,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn chatbot_id(&self) -> Uuid {
        self.chatbot_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn byte_size(&self) -> i64 {
        self.byte_size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content_hash(&self) -> Option<&str> {
        self.content_hash.as_deref()
    }

    pub fn chunk_count(&self) -> i32 {
        self.chunk_count
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn start_processing(&mut self) -> Result<(), String> {
        if !self.status.can_transition_to(&DocumentStatus::Processing) {
            return Err(format!(
                "Document in {} state cannot start processing",
                self.status
            ));
        }
        self.status = DocumentStatus::Processing;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn complete_processing(&mut self, chunk_count: i32) -> Result<(), String> {
        if !self.status.can_transition_to(&DocumentStatus::Completed) {
            return Err(format!("Document in {} state cannot complete", self.status));
        }
        if chunk_count <= 0 {
            return Err("A completed document must have at least one chunk".to_string());
        }
        self.status = DocumentStatus::Completed;
        self.chunk_count = chunk_count;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn fail_processing(&mut self, error: String) -> Result<(), String> {
        let failed = DocumentStatus::Failed(error);
        if !self.status.can_transition_to(&failed) {
            return Err(format!("Document in {} state cannot fail", self.status));
        }
        self.status = failed;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
            self.updated_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::new(
            Uuid::new_v4(),
            "handbook.pdf".to_string(),
            "blobs/abc".to_string(),
            2048,
            "application/pdf".to_string(),
            Some("deadbeef".to_string()),
        )
    }

    #[test]
    fn test_new_document_is_pending_with_zero_chunks() {
        let document = sample_document();

        assert_eq!(document.status(), &DocumentStatus::Pending);
        assert_eq!(document.chunk_count(), 0);
        assert!(!document.is_deleted());
    }

    #[test]
    fn test_successful_lifecycle() {
        let mut document = sample_document();

        assert!(document.start_processing().is_ok());
        assert_eq!(document.status(), &DocumentStatus::Processing);

        assert!(document.complete_processing(7).is_ok());
        assert_eq!(document.status(), &DocumentStatus::Completed);
        assert_eq!(document.chunk_count(), 7);
    }

    #[test]
    fn test_failed_lifecycle_preserves_error() {
        let mut document = sample_document();

        document.start_processing().unwrap();
        document
            .fail_processing("Unsupported format: image/png".to_string())
            .unwrap();

        assert_eq!(document.error_message(), Some("Unsupported format: image/png"));
        assert_eq!(document.chunk_count(), 0);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut completed = sample_document();
        completed.start_processing().unwrap();
        completed.complete_processing(3).unwrap();

        assert!(completed.start_processing().is_err());
        assert!(completed.fail_processing("late".to_string()).is_err());

        let mut failed = sample_document();
        failed.start_processing().unwrap();
        failed.fail_processing("boom".to_string()).unwrap();

        assert!(failed.start_processing().is_err());
        assert!(failed.complete_processing(1).is_err());
    }

    #[test]
    fn test_processing_can_resume_after_restart() {
        let mut document = sample_document();
        document.start_processing().unwrap();

        // A worker picking the document back up after a crash re-marks it.
        assert!(document.start_processing().is_ok());
        assert_eq!(document.status(), &DocumentStatus::Processing);
    }

    #[test]
    fn test_completion_requires_chunks() {
        let mut document = sample_document();
        document.start_processing().unwrap();

        assert!(document.complete_processing(0).is_err());
    }

    #[test]
    fn test_soft_delete_is_idempotent() {
        let mut document = sample_document();

        document.soft_delete();
        let first = document.deleted_at();
        document.soft_delete();

        assert_eq!(document.deleted_at(), first);
    }
}
