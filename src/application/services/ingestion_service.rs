use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::{BlobStorage, ContentExtractor, VectorIndex};
use crate::application::services::chunker::OverlapChunker;
use crate::domain::entities::{Document, IngestionJob};
use crate::domain::repositories::{
    ChatbotRepository, DocumentRepository, IngestionJobRepository,
};

#[derive(Debug)]
pub enum IngestionServiceError {
    DocumentNotFound(Uuid),
    JobNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for IngestionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionServiceError::DocumentNotFound(id) => {
                write!(f, "Document not found: {}", id)
            }
            IngestionServiceError::JobNotFound(id) => write!(f, "Job not found: {}", id),
            IngestionServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for IngestionServiceError {}

/// Drives one document from raw bytes to indexed chunks, owning every status
/// write along the way: extraction, then chunking, then the namespace upsert.
///
/// Failures are contained here: an extraction or indexing error ends in the
/// document's `failed` status and error message, never in a propagated
/// error, since the uploader already got its acknowledgment. The returned
/// error covers only bookkeeping problems (missing rows, repository
/// failures) that the worker loop logs.
pub struct IngestionService {
    documents: Arc<dyn DocumentRepository>,
    chatbots: Arc<dyn ChatbotRepository>,
    jobs: Arc<dyn IngestionJobRepository>,
    blobs: Arc<dyn BlobStorage>,
    extractor: Arc<dyn ContentExtractor>,
    index: Arc<dyn VectorIndex>,
    chunker: OverlapChunker,
}

impl IngestionService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        chatbots: Arc<dyn ChatbotRepository>,
        jobs: Arc<dyn IngestionJobRepository>,
        blobs: Arc<dyn BlobStorage>,
        extractor: Arc<dyn ContentExtractor>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            documents,
            chatbots,
            jobs,
            blobs,
            extractor,
            index,
            chunker: OverlapChunker::default(),
        }
    }

    pub async fn ingest(&self, job_id: Uuid, document_id: Uuid) -> Result<(), IngestionServiceError> {
        let mut job = self
            .jobs
            .find_by_id(job_id)
            .await
            .map_err(|e| IngestionServiceError::RepositoryError(e.to_string()))?
            .ok_or(IngestionServiceError::JobNotFound(job_id))?;

        if job.is_finished() {
            tracing::debug!(job_id = %job_id, "Skipping finished ingestion job");
            return Ok(());
        }

        let mut document = self
            .documents
            .find_by_id(document_id)
            .await
            .map_err(|e| IngestionServiceError::RepositoryError(e.to_string()))?
            .ok_or(IngestionServiceError::DocumentNotFound(document_id))?;

        if document.is_deleted() || document.status().is_terminal() {
            tracing::debug!(document_id = %document_id, "Skipping deleted or settled document");
            return Ok(());
        }

        // The processing transition is persisted before any work so a
        // monitoring query can tell "started" from "never picked up".
        document
            .start_processing()
            .map_err(IngestionServiceError::RepositoryError)?;
        self.persist_document(&document).await?;
        job.start().map_err(IngestionServiceError::RepositoryError)?;
        self.persist_job(&job).await?;

        let data = match self.blobs.get(document.storage_key()).await {
            Ok(data) => data,
            Err(e) => {
                return self
                    .settle_failed(&mut document, &mut job, format!("Blob fetch failed: {}", e))
                    .await;
            }
        };

        let text = match self.extractor.extract(&data, document.mime_type()) {
            Ok(text) => text,
            Err(e) => {
                return self.settle_failed(&mut document, &mut job, e.to_string()).await;
            }
        };

        if text.trim().is_empty() {
            return self
                .settle_failed(&mut document, &mut job, "No extractable text".to_string())
                .await;
        }

        let chunks = self.chunker.chunk(&text, document.file_name());

        let namespace = match self.chatbots.find_by_id(document.chatbot_id()).await {
            Ok(Some(chatbot)) => chatbot.namespace().clone(),
            Ok(None) => {
                return self
                    .settle_failed(&mut document, &mut job, "Owning chatbot no longer exists".to_string())
                    .await;
            }
            Err(e) => return Err(IngestionServiceError::RepositoryError(e.to_string())),
        };

        let indexed = match self.index.upsert(&namespace, &chunks).await {
            Ok(count) => count,
            Err(e) => {
                // Vectors upserted before the error stay behind as orphans;
                // the namespace purge on chatbot deletion sweeps them.
                return self
                    .settle_failed(&mut document, &mut job, format!("Indexing failed: {}", e))
                    .await;
            }
        };

        document
            .complete_processing(indexed as i32)
            .map_err(IngestionServiceError::RepositoryError)?;
        self.persist_document(&document).await?;
        job.complete().map_err(IngestionServiceError::RepositoryError)?;
        self.persist_job(&job).await?;

        tracing::info!(
            document_id = %document_id,
            chunks = indexed,
            "Document ingestion completed"
        );
        Ok(())
    }

    async fn settle_failed(
        &self,
        document: &mut Document,
        job: &mut IngestionJob,
        error: String,
    ) -> Result<(), IngestionServiceError> {
        tracing::warn!(document_id = %document.id(), error = %error, "Document ingestion failed");
        document
            .fail_processing(error.clone())
            .map_err(IngestionServiceError::RepositoryError)?;
        self.persist_document(document).await?;
        job.fail(error).map_err(IngestionServiceError::RepositoryError)?;
        self.persist_job(job).await
    }

    async fn persist_document(&self, document: &Document) -> Result<(), IngestionServiceError> {
        self.documents
            .update(document)
            .await
            .map_err(|e| IngestionServiceError::RepositoryError(e.to_string()))
    }

    async fn persist_job(&self, job: &IngestionJob) -> Result<(), IngestionServiceError> {
        self.jobs
            .update(job)
            .await
            .map_err(|e| IngestionServiceError::RepositoryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Chatbot;
    use crate::domain::value_objects::DocumentStatus;
    use crate::infrastructure::external_services::extractors::CompositeExtractor;
    use crate::test_support::{
        InMemoryBlobStorage, InMemoryChatbotRepository, InMemoryDocumentRepository,
        InMemoryIngestionJobRepository, InMemoryVectorIndex,
    };

    struct Fixture {
        documents: Arc<InMemoryDocumentRepository>,
        chatbots: Arc<InMemoryChatbotRepository>,
        jobs: Arc<InMemoryIngestionJobRepository>,
        blobs: Arc<InMemoryBlobStorage>,
        index: Arc<InMemoryVectorIndex>,
        service: IngestionService,
    }

    fn fixture() -> Fixture {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let chatbots = Arc::new(InMemoryChatbotRepository::default());
        let jobs = Arc::new(InMemoryIngestionJobRepository::default());
        let blobs = Arc::new(InMemoryBlobStorage::default());
        let index = Arc::new(InMemoryVectorIndex::default());

        let service = IngestionService::new(
            documents.clone(),
            chatbots.clone(),
            jobs.clone(),
            blobs.clone(),
            Arc::new(CompositeExtractor::new()),
            index.clone(),
        );

        Fixture {
            documents,
            chatbots,
            jobs,
            blobs,
            index,
            service,
        }
    }

    async fn seed(
        fixture: &Fixture,
        data: &[u8],
        file_name: &str,
        mime_type: &str,
    ) -> (Chatbot, Document, IngestionJob) {
        let chatbot = Chatbot::new(
            Uuid::new_v4(),
            "Support bot".to_string(),
            "Be helpful.".to_string(),
            "gpt-4o-mini".to_string(),
            None,
        );
        fixture.chatbots.save(&chatbot).await.unwrap();

        let blob = fixture.blobs.put(data).await.unwrap();
        let document = Document::new(
            chatbot.id(),
            file_name.to_string(),
            blob.key,
            data.len() as i64,
            mime_type.to_string(),
            None,
        );
        fixture.documents.save(&document).await.unwrap();

        let job = IngestionJob::new(document.id());
        fixture.jobs.save(&job).await.unwrap();

        (chatbot, document, job)
    }

    fn boundary_free_text(len: usize) -> String {
        "abcdefghij".chars().cycle().take(len).collect()
    }

    #[tokio::test]
    async fn test_plain_text_upload_completes_with_three_chunks() {
        let fixture = fixture();
        let text = boundary_free_text(3000);
        let (chatbot, document, job) =
            seed(&fixture, text.as_bytes(), "notes.txt", "text/plain").await;
        assert_eq!(document.status(), &DocumentStatus::Pending);

        fixture.service.ingest(job.id(), document.id()).await.unwrap();

        let settled = fixture
            .documents
            .find_by_id(document.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(settled.status(), &DocumentStatus::Completed);
        assert_eq!(settled.chunk_count(), 3);
        assert_eq!(fixture.index.chunk_count(chatbot.namespace()), 3);

        let settled_job = fixture.jobs.find_by_id(job.id()).await.unwrap().unwrap();
        assert!(settled_job.status().is_completed());
    }

    #[tokio::test]
    async fn test_unsupported_mime_type_fails_with_nothing_indexed() {
        let fixture = fixture();
        let (chatbot, document, job) =
            seed(&fixture, b"\x89PNG\r\n", "logo.png", "image/png").await;

        fixture.service.ingest(job.id(), document.id()).await.unwrap();

        let settled = fixture
            .documents
            .find_by_id(document.id())
            .await
            .unwrap()
            .unwrap();
        assert!(settled.status().is_failed());
        assert!(
            settled
                .error_message()
                .unwrap()
                .contains("Unsupported format: image/png")
        );
        assert_eq!(settled.chunk_count(), 0);
        assert_eq!(fixture.index.chunk_count(chatbot.namespace()), 0);
    }

    #[tokio::test]
    async fn test_indexing_failure_settles_as_failed() {
        let fixture = fixture();
        let text = boundary_free_text(1500);
        let (_, document, job) = seed(&fixture, text.as_bytes(), "notes.txt", "text/plain").await;

        fixture.index.fail_next_upsert();
        fixture.service.ingest(job.id(), document.id()).await.unwrap();

        let settled = fixture
            .documents
            .find_by_id(document.id())
            .await
            .unwrap()
            .unwrap();
        assert!(settled.status().is_failed());
        assert!(settled.error_message().unwrap().contains("Indexing failed"));
    }

    #[tokio::test]
    async fn test_one_failure_does_not_affect_other_documents() {
        let fixture = fixture();
        let (_, bad_doc, bad_job) = seed(&fixture, b"binary", "img.png", "image/png").await;
        let text = boundary_free_text(500);
        let (_, good_doc, good_job) =
            seed(&fixture, text.as_bytes(), "ok.txt", "text/plain").await;

        fixture.service.ingest(bad_job.id(), bad_doc.id()).await.unwrap();
        fixture.service.ingest(good_job.id(), good_doc.id()).await.unwrap();

        let good = fixture
            .documents
            .find_by_id(good_doc.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(good.status(), &DocumentStatus::Completed);
        assert_eq!(good.chunk_count(), 1);
    }

    #[tokio::test]
    async fn test_settled_document_is_not_reprocessed() {
        let fixture = fixture();
        let text = boundary_free_text(500);
        let (chatbot, document, job) =
            seed(&fixture, text.as_bytes(), "ok.txt", "text/plain").await;

        fixture.service.ingest(job.id(), document.id()).await.unwrap();
        // A second delivery of the same job must not double-index.
        fixture.service.ingest(job.id(), document.id()).await.unwrap();

        assert_eq!(fixture.index.chunk_count(chatbot.namespace()), 1);
    }

    #[tokio::test]
    async fn test_namespace_isolation_survives_deletion() {
        let fixture = fixture();
        let text_a = boundary_free_text(500);
        let (bot_a, doc_a, job_a) =
            seed(&fixture, text_a.as_bytes(), "a.txt", "text/plain").await;
        let text_b = boundary_free_text(500);
        let (bot_b, doc_b, job_b) =
            seed(&fixture, text_b.as_bytes(), "b.txt", "text/plain").await;

        fixture.service.ingest(job_a.id(), doc_a.id()).await.unwrap();
        fixture.service.ingest(job_b.id(), doc_b.id()).await.unwrap();

        fixture.index.delete_namespace(bot_a.namespace()).await.unwrap();

        assert_eq!(fixture.index.chunk_count(bot_a.namespace()), 0);
        assert_eq!(fixture.index.chunk_count(bot_b.namespace()), 1);
        let results = fixture
            .index
            .query(bot_b.namespace(), "anything", 4)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, "b.txt");
    }
}
