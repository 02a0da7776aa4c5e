pub mod chatbot_repository;
pub mod conversation_repository;
pub mod credential_repository;
pub mod document_repository;
pub mod ingestion_job_repository;

pub use chatbot_repository::{ChatbotRepository, ChatbotRepositoryError};
pub use conversation_repository::{ConversationRepository, ConversationRepositoryError};
pub use credential_repository::{CredentialRepository, CredentialRepositoryError};
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
pub use ingestion_job_repository::{IngestionJobRepository, IngestionJobRepositoryError};
