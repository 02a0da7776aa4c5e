pub mod chatbot;
pub mod conversation;
pub mod credential;
pub mod document;
pub mod ingestion_job;

pub use chatbot::Chatbot;
pub use conversation::{Conversation, Message, MessageRole};
pub use credential::Credential;
pub use document::Document;
pub use ingestion_job::IngestionJob;
