pub mod chat_service;
pub mod chunker;
pub mod ingestion_service;

pub use chat_service::{ChatError, ChatOutcome, ChatService};
pub use chunker::OverlapChunker;
pub use ingestion_service::{IngestionService, IngestionServiceError};
