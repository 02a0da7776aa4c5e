use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::IngestionJob;

#[derive(Debug)]
pub enum IngestionJobRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for IngestionJobRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionJobRepositoryError::NotFound(id) => {
                write!(f, "Ingestion job not found: {}", id)
            }
            IngestionJobRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
            IngestionJobRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for IngestionJobRepositoryError {}

#[async_trait]
pub trait IngestionJobRepository: Send + Sync {
    async fn save(&self, job: &IngestionJob) -> Result<Uuid, IngestionJobRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<IngestionJob>, IngestionJobRepositoryError>;

    /// Jobs still in `pending` or `processing`, oldest first. Used at startup
    /// to re-enqueue work interrupted by a restart.
    async fn find_unfinished(&self) -> Result<Vec<IngestionJob>, IngestionJobRepositoryError>;

    async fn update(&self, job: &IngestionJob) -> Result<(), IngestionJobRepositoryError>;
}
