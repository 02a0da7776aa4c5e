use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Credential;

#[derive(Debug, Deserialize)]
pub struct StoreCredentialDto {
    pub provider: String,
    pub api_key: String,
    pub spend_limit_tokens: Option<i64>,
}

/// Key material never appears here: a stored credential is reported by its
/// metadata only.
#[derive(Debug, Serialize)]
pub struct CredentialResponseDto {
    pub id: Uuid,
    pub provider: String,
    pub active: bool,
    pub spend_limit_tokens: Option<i64>,
    pub tokens_used: i64,
    pub created_at: String,
}

impl From<Credential> for CredentialResponseDto {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id(),
            provider: credential.provider().as_str().to_string(),
            active: credential.is_active(),
            spend_limit_tokens: credential.spend_limit_tokens(),
            tokens_used: credential.tokens_used(),
            created_at: credential.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CredentialListResponseDto {
    pub credentials: Vec<CredentialResponseDto>,
}
