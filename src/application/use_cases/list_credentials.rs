use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Credential;
use crate::domain::repositories::{CredentialRepository, CredentialRepositoryError};

#[derive(Debug)]
pub enum ListCredentialsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListCredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListCredentialsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListCredentialsError {}

impl From<CredentialRepositoryError> for ListCredentialsError {
    fn from(error: CredentialRepositoryError) -> Self {
        ListCredentialsError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListCredentialsRequest {
    pub workspace_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListCredentialsResponse {
    pub credentials: Vec<Credential>,
}

pub struct ListCredentialsUseCase {
    credentials: Arc<dyn CredentialRepository>,
}

impl ListCredentialsUseCase {
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    pub async fn execute(
        &self,
        request: ListCredentialsRequest,
    ) -> Result<ListCredentialsResponse, ListCredentialsError> {
        let credentials = self
            .credentials
            .find_by_workspace(request.workspace_id)
            .await?;

        Ok(ListCredentialsResponse { credentials })
    }
}
