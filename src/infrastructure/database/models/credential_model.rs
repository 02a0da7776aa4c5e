use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::Credential;
use crate::domain::value_objects::ProviderKind;
use crate::infrastructure::database::schema::credentials;

// No Serialize here: a credential row carries ciphertext and must not leak
// through an accidental debug endpoint.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CredentialModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub provider: String,
    pub encrypted_key: String,
    pub active: bool,
    pub spend_limit_tokens: Option<i64>,
    pub tokens_used: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = credentials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCredentialModel {
    pub id: Option<Uuid>,
    pub workspace_id: Uuid,
    pub provider: String,
    pub encrypted_key: String,
    pub active: bool,
    pub spend_limit_tokens: Option<i64>,
    pub tokens_used: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Credential> for NewCredentialModel {
    fn from(credential: &Credential) -> Self {
        Self {
            id: Some(credential.id()),
            workspace_id: credential.workspace_id(),
            provider: credential.provider().as_str().to_string(),
            encrypted_key: credential.encrypted_key().to_string(),
            active: credential.is_active(),
            spend_limit_tokens: credential.spend_limit_tokens(),
            tokens_used: credential.tokens_used(),
            created_at: credential.created_at(),
        }
    }
}

impl TryFrom<CredentialModel> for Credential {
    type Error = String;

    fn try_from(model: CredentialModel) -> Result<Self, Self::Error> {
        let provider = ProviderKind::from_str(&model.provider)?;

        Ok(Credential::from_database(
            model.id,
            model.workspace_id,
            provider,
            model.encrypted_key,
            model.active,
            model.spend_limit_tokens,
            model.tokens_used,
            model.created_at,
        ))
    }
}
