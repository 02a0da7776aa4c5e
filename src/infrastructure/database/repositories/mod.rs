pub mod postgres_chatbot_repository;
pub mod postgres_conversation_repository;
pub mod postgres_credential_repository;
pub mod postgres_document_repository;
pub mod postgres_ingestion_job_repository;

pub use postgres_chatbot_repository::PostgresChatbotRepository;
pub use postgres_conversation_repository::PostgresConversationRepository;
pub use postgres_credential_repository::PostgresCredentialRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_ingestion_job_repository::PostgresIngestionJobRepository;
