use async_trait::async_trait;

#[derive(Debug)]
pub enum BlobStorageError {
    NotFound(String),
    IoError(String),
}

impl std::fmt::Display for BlobStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlobStorageError::NotFound(key) => write!(f, "Blob not found: {}", key),
            BlobStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for BlobStorageError {}

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub key: String,
    pub size: u64,
}

/// Durable storage for raw uploaded files, addressed by an opaque key.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    async fn put(&self, data: &[u8]) -> Result<StoredBlob, BlobStorageError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobStorageError>;

    async fn delete(&self, key: &str) -> Result<bool, BlobStorageError>;
}
