use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{BlobStorage, BlobStorageError, StoredBlob};

/// Blob storage on the local filesystem: one file per blob under the base
/// directory, keyed by a generated UUID.
pub struct LocalBlobStorage {
    base_path: PathBuf,
}

impl LocalBlobStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    async fn ensure_directory_exists(&self) -> Result<(), BlobStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf, BlobStorageError> {
        // Keys are UUIDs we generated; anything else (path separators, dots)
        // is rejected rather than resolved.
        if Uuid::parse_str(key).is_err() {
            return Err(BlobStorageError::NotFound(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn put(&self, data: &[u8]) -> Result<StoredBlob, BlobStorageError> {
        self.ensure_directory_exists().await?;

        let key = Uuid::new_v4().to_string();
        let path = self.base_path.join(&key);

        fs::write(&path, data)
            .await
            .map_err(|e| BlobStorageError::IoError(e.to_string()))?;

        Ok(StoredBlob {
            key,
            size: data.len() as u64,
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobStorageError> {
        let path = self.blob_path(key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobStorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(BlobStorageError::IoError(e.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobStorageError> {
        let path = self.blob_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BlobStorageError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> LocalBlobStorage {
        let dir = std::env::temp_dir().join(format!("ragdesk-blobs-{}", Uuid::new_v4()));
        LocalBlobStorage::new(dir)
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let storage = storage();
        let blob = storage.put(b"raw document bytes").await.unwrap();

        assert_eq!(blob.size, 18);
        let data = storage.get(&blob.key).await.unwrap();
        assert_eq!(data, b"raw document bytes");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_found() {
        let storage = storage();
        let result = storage.get(&Uuid::new_v4().to_string()).await;

        assert!(matches!(result, Err(BlobStorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_traversal_keys_are_rejected() {
        let storage = storage();
        let result = storage.get("../../etc/passwd").await;

        assert!(matches!(result, Err(BlobStorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let storage = storage();
        let blob = storage.put(b"bytes").await.unwrap();

        assert!(storage.delete(&blob.key).await.unwrap());
        assert!(!storage.delete(&blob.key).await.unwrap());
    }
}
