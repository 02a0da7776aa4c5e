use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Credential;
use crate::domain::repositories::{CredentialRepository, CredentialRepositoryError};
use crate::domain::value_objects::ProviderKind;
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{CredentialModel, NewCredentialModel};
use crate::infrastructure::database::schema::credentials::dsl::*;

pub struct PostgresCredentialRepository {
    pool: DbPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn save(&self, credential: &Credential) -> Result<Uuid, CredentialRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let new_credential = NewCredentialModel::from(credential);

        let inserted: CredentialModel = diesel::insert_into(credentials)
            .values(&new_credential)
            .get_result(&mut conn)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        Ok(inserted.id)
    }

    async fn find_by_id(
        &self,
        credential_id: Uuid,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let result = credentials
            .find(credential_id)
            .first::<CredentialModel>(&mut conn)
            .optional()
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let credential = Credential::try_from(model)
                    .map_err(CredentialRepositoryError::ValidationError)?;
                Ok(Some(credential))
            }
            None => Ok(None),
        }
    }

    async fn find_active(
        &self,
        owner_id: Uuid,
        provider_kind: ProviderKind,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let result = credentials
            .filter(workspace_id.eq(owner_id))
            .filter(provider.eq(provider_kind.as_str()))
            .filter(active.eq(true))
            .order(created_at.desc())
            .first::<CredentialModel>(&mut conn)
            .optional()
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let credential = Credential::try_from(model)
                    .map_err(CredentialRepositoryError::ValidationError)?;
                Ok(Some(credential))
            }
            None => Ok(None),
        }
    }

    async fn find_by_workspace(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Credential>, CredentialRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let models = credentials
            .filter(workspace_id.eq(owner_id))
            .order(created_at.desc())
            .load::<CredentialModel>(&mut conn)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(
                Credential::try_from(model).map_err(CredentialRepositoryError::ValidationError)?,
            );
        }
        Ok(result)
    }

    async fn update(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewCredentialModel::from(credential);

        diesel::update(credentials.find(credential.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| CredentialRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
