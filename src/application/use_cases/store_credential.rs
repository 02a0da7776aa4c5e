use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::{SecretVault, VaultError};
use crate::domain::entities::Credential;
use crate::domain::repositories::{CredentialRepository, CredentialRepositoryError};
use crate::domain::value_objects::ProviderKind;

#[derive(Debug)]
pub enum StoreCredentialError {
    ValidationError(String),
    VaultError(String),
    RepositoryError(String),
}

impl std::fmt::Display for StoreCredentialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreCredentialError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StoreCredentialError::VaultError(msg) => write!(f, "Vault error: {}", msg),
            StoreCredentialError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for StoreCredentialError {}

impl From<VaultError> for StoreCredentialError {
    fn from(error: VaultError) -> Self {
        StoreCredentialError::VaultError(error.to_string())
    }
}

impl From<CredentialRepositoryError> for StoreCredentialError {
    fn from(error: CredentialRepositoryError) -> Self {
        StoreCredentialError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct StoreCredentialRequest {
    pub workspace_id: Uuid,
    pub provider: String,
    pub api_key: String,
    pub spend_limit_tokens: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StoreCredentialResponse {
    pub credential: Credential,
}

/// Encrypts the key before it touches a repository; a credential row never
/// carries plaintext. Storing a new key deactivates the workspace's previous
/// key for the same provider so `find_active` stays unambiguous.
pub struct StoreCredentialUseCase {
    credentials: Arc<dyn CredentialRepository>,
    vault: Arc<dyn SecretVault>,
}

impl StoreCredentialUseCase {
    pub fn new(credentials: Arc<dyn CredentialRepository>, vault: Arc<dyn SecretVault>) -> Self {
        Self { credentials, vault }
    }

    pub async fn execute(
        &self,
        request: StoreCredentialRequest,
    ) -> Result<StoreCredentialResponse, StoreCredentialError> {
        let provider = ProviderKind::from_str(&request.provider)
            .map_err(StoreCredentialError::ValidationError)?;

        if request.api_key.trim().is_empty() {
            return Err(StoreCredentialError::ValidationError(
                "API key cannot be empty".to_string(),
            ));
        }

        if let Some(mut previous) = self
            .credentials
            .find_active(request.workspace_id, provider)
            .await?
        {
            previous.deactivate();
            self.credentials.update(&previous).await?;
        }

        let encrypted_key = self.vault.encrypt(&request.api_key)?;
        let credential = Credential::new(
            request.workspace_id,
            provider,
            encrypted_key,
            request.spend_limit_tokens,
        );
        self.credentials.save(&credential).await?;

        tracing::info!(
            workspace_id = %request.workspace_id,
            provider = %provider,
            "Credential stored"
        );

        Ok(StoreCredentialResponse { credential })
    }
}
