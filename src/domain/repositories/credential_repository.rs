use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Credential;
use crate::domain::value_objects::ProviderKind;

#[derive(Debug)]
pub enum CredentialRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for CredentialRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialRepositoryError::NotFound(id) => write!(f, "Credential not found: {}", id),
            CredentialRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            CredentialRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CredentialRepositoryError {}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn save(&self, credential: &Credential) -> Result<Uuid, CredentialRepositoryError>;

    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<Credential>, CredentialRepositoryError>;

    /// The workspace's active credential for one provider, if any.
    async fn find_active(
        &self,
        workspace_id: Uuid,
        provider: ProviderKind,
    ) -> Result<Option<Credential>, CredentialRepositoryError>;

    async fn find_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<Credential>, CredentialRepositoryError>;

    async fn update(&self, credential: &Credential) -> Result<(), CredentialRepositoryError>;
}
