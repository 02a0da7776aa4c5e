pub mod blob_storage;
pub mod chat_provider;
pub mod content_extractor;
pub mod ingestion_queue;
pub mod secret_vault;
pub mod vector_index;

pub use blob_storage::{BlobStorage, BlobStorageError, StoredBlob};
pub use chat_provider::{
    ChatCompletion, ChatMessage, ChatProvider, ChatProviderError, ChatRequest, ProviderRegistry,
    TokenUsage,
};
pub use content_extractor::{ContentExtractor, ExtractionError};
pub use ingestion_queue::{IngestionQueue, IngestionQueueError, QueuedIngestion};
pub use secret_vault::{SecretVault, VaultError};
pub use vector_index::{RetrievedChunk, VectorIndex, VectorIndexError};
