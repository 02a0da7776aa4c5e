use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::{CredentialRepository, CredentialRepositoryError};

#[derive(Debug)]
pub enum RevokeCredentialError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for RevokeCredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RevokeCredentialError::NotFound(id) => write!(f, "Credential not found: {}", id),
            RevokeCredentialError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RevokeCredentialError {}

impl From<CredentialRepositoryError> for RevokeCredentialError {
    fn from(error: CredentialRepositoryError) -> Self {
        RevokeCredentialError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RevokeCredentialRequest {
    pub workspace_id: Uuid,
    pub credential_id: Uuid,
}

pub struct RevokeCredentialUseCase {
    credentials: Arc<dyn CredentialRepository>,
}

impl RevokeCredentialUseCase {
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    pub async fn execute(
        &self,
        request: RevokeCredentialRequest,
    ) -> Result<(), RevokeCredentialError> {
        let mut credential = self
            .credentials
            .find_by_id(request.credential_id)
            .await?
            .filter(|c| c.workspace_id() == request.workspace_id)
            .ok_or(RevokeCredentialError::NotFound(request.credential_id))?;

        credential.deactivate();
        self.credentials.update(&credential).await?;

        Ok(())
    }
}
