use std::sync::Arc;

use crate::application::ports::{
    BlobStorage, ContentExtractor, IngestionQueue, ProviderRegistry, SecretVault, VectorIndex,
};
use crate::application::services::{ChatService, IngestionService};
use crate::application::use_cases::{
    CreateChatbotUseCase, DeleteChatbotUseCase, DeleteDocumentUseCase, GetChatbotUseCase,
    GetDocumentUseCase, ListChatbotsUseCase, ListCredentialsUseCase, ListDocumentsUseCase,
    RevokeCredentialUseCase, SendChatMessageUseCase, StoreCredentialUseCase,
    UploadDocumentUseCase,
};
use crate::domain::repositories::{
    ChatbotRepository, ConversationRepository, CredentialRepository, DocumentRepository,
    IngestionJobRepository,
};
use crate::infrastructure::config::Settings;
use crate::infrastructure::crypto::CredentialVault;
use crate::infrastructure::database::repositories::{
    PostgresChatbotRepository, PostgresConversationRepository, PostgresCredentialRepository,
    PostgresDocumentRepository, PostgresIngestionJobRepository,
};
use crate::infrastructure::database::{create_connection_pool, run_migrations};
use crate::infrastructure::external_services::{
    CompositeExtractor, HttpVectorIndex, VectorServiceConfig, default_registry,
};
use crate::infrastructure::file_system::LocalBlobStorage;
use crate::infrastructure::messaging::{
    IngestionWorkerPool, MpscIngestionQueue, recover_interrupted_jobs,
};
use crate::presentation::http::handlers::{
    ChatHandler, ChatbotHandler, CredentialHandler, DocumentHandler,
};

/// Builds and wires every long-lived component of the process.
pub struct AppContainer {
    // Repositories
    pub chatbot_repository: Arc<dyn ChatbotRepository>,
    pub document_repository: Arc<dyn DocumentRepository>,
    pub conversation_repository: Arc<dyn ConversationRepository>,
    pub credential_repository: Arc<dyn CredentialRepository>,
    pub job_repository: Arc<dyn IngestionJobRepository>,

    // External services
    pub blob_storage: Arc<dyn BlobStorage>,
    pub content_extractor: Arc<dyn ContentExtractor>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub provider_registry: Arc<ProviderRegistry>,
    pub vault: Arc<dyn SecretVault>,

    // Ingestion
    pub ingestion_queue: Arc<dyn IngestionQueue>,
    pub worker_pool: Arc<IngestionWorkerPool>,

    // HTTP handlers
    pub chatbot_handler: Arc<ChatbotHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub chat_handler: Arc<ChatHandler>,
    pub credential_handler: Arc<CredentialHandler>,
}

impl AppContainer {
    pub fn new(settings: &Settings) -> Result<Self, Box<dyn std::error::Error>> {
        // Database
        let pool = create_connection_pool(&settings.database_url)?;
        run_migrations(&pool)?;

        let chatbot_repository: Arc<dyn ChatbotRepository> =
            Arc::new(PostgresChatbotRepository::new(pool.clone()));
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(pool.clone()));
        let conversation_repository: Arc<dyn ConversationRepository> =
            Arc::new(PostgresConversationRepository::new(pool.clone()));
        let credential_repository: Arc<dyn CredentialRepository> =
            Arc::new(PostgresCredentialRepository::new(pool.clone()));
        let job_repository: Arc<dyn IngestionJobRepository> =
            Arc::new(PostgresIngestionJobRepository::new(pool));

        // External services
        let blob_storage: Arc<dyn BlobStorage> =
            Arc::new(LocalBlobStorage::new(settings.uploads_dir.clone()));
        let content_extractor: Arc<dyn ContentExtractor> = Arc::new(CompositeExtractor::new());
        let vector_index: Arc<dyn VectorIndex> = Arc::new(HttpVectorIndex::new(
            VectorServiceConfig {
                base_url: settings.vector_service_url.clone(),
                api_key: settings.vector_service_api_key.clone(),
                timeout_secs: settings.http_timeout_secs,
                ..VectorServiceConfig::default()
            },
        )?);
        let provider_registry = Arc::new(default_registry(settings.http_timeout_secs)?);
        let vault: Arc<dyn SecretVault> =
            Arc::new(CredentialVault::new(&settings.credential_master_secret));

        // Ingestion pipeline
        let (queue, receiver) = MpscIngestionQueue::create_pair();
        let ingestion_queue: Arc<dyn IngestionQueue> = Arc::new(queue);

        let ingestion_service = Arc::new(IngestionService::new(
            document_repository.clone(),
            chatbot_repository.clone(),
            job_repository.clone(),
            blob_storage.clone(),
            content_extractor.clone(),
            vector_index.clone(),
        ));

        let worker_pool = Arc::new(
            IngestionWorkerPool::new(Arc::new(receiver), ingestion_service)
                .with_worker_count(settings.ingestion_workers),
        );

        // Chat
        let chat_service = Arc::new(ChatService::new(
            chatbot_repository.clone(),
            credential_repository.clone(),
            conversation_repository.clone(),
            vector_index.clone(),
            provider_registry.clone(),
            vault.clone(),
        ));

        // Use cases
        let create_chatbot = Arc::new(CreateChatbotUseCase::new(chatbot_repository.clone()));
        let get_chatbot = Arc::new(GetChatbotUseCase::new(chatbot_repository.clone()));
        let list_chatbots = Arc::new(ListChatbotsUseCase::new(chatbot_repository.clone()));
        let delete_chatbot = Arc::new(DeleteChatbotUseCase::new(
            chatbot_repository.clone(),
            document_repository.clone(),
            vector_index.clone(),
        ));

        let upload_document = Arc::new(UploadDocumentUseCase::new(
            chatbot_repository.clone(),
            document_repository.clone(),
            job_repository.clone(),
            blob_storage.clone(),
            ingestion_queue.clone(),
        ));
        let get_document = Arc::new(GetDocumentUseCase::new(
            document_repository.clone(),
            chatbot_repository.clone(),
        ));
        let list_documents = Arc::new(ListDocumentsUseCase::new(
            document_repository.clone(),
            chatbot_repository.clone(),
        ));
        let delete_document = Arc::new(DeleteDocumentUseCase::new(
            document_repository.clone(),
            chatbot_repository.clone(),
        ));

        let send_chat_message = Arc::new(SendChatMessageUseCase::new(chat_service));

        let store_credential = Arc::new(StoreCredentialUseCase::new(
            credential_repository.clone(),
            vault.clone(),
        ));
        let list_credentials =
            Arc::new(ListCredentialsUseCase::new(credential_repository.clone()));
        let revoke_credential =
            Arc::new(RevokeCredentialUseCase::new(credential_repository.clone()));

        // HTTP handlers
        let chatbot_handler = Arc::new(ChatbotHandler::new(
            create_chatbot,
            get_chatbot,
            list_chatbots,
            delete_chatbot,
        ));
        let document_handler = Arc::new(DocumentHandler::new(
            upload_document,
            get_document,
            list_documents,
            delete_document,
        ));
        let chat_handler = Arc::new(ChatHandler::new(send_chat_message));
        let credential_handler = Arc::new(CredentialHandler::new(
            store_credential,
            list_credentials,
            revoke_credential,
        ));

        Ok(Self {
            chatbot_repository,
            document_repository,
            conversation_repository,
            credential_repository,
            job_repository,
            blob_storage,
            content_extractor,
            vector_index,
            provider_registry,
            vault,
            ingestion_queue,
            worker_pool,
            chatbot_handler,
            document_handler,
            chat_handler,
            credential_handler,
        })
    }

    /// Re-enqueue ingestion jobs left unfinished by the previous run.
    pub async fn recover_interrupted_jobs(&self) -> Result<usize, Box<dyn std::error::Error>> {
        recover_interrupted_jobs(&self.job_repository, &self.ingestion_queue)
            .await
            .map_err(|e| e.into())
    }
}
