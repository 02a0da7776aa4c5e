pub mod chatbot_model;
pub mod conversation_model;
pub mod credential_model;
pub mod document_model;
pub mod ingestion_job_model;

pub use chatbot_model::{ChatbotModel, NewChatbotModel};
pub use conversation_model::{ConversationModel, NewConversationModel};
pub use credential_model::{CredentialModel, NewCredentialModel};
pub use document_model::{DocumentModel, NewDocumentModel};
pub use ingestion_job_model::{IngestionJobModel, NewIngestionJobModel};
