use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::IngestionJob;
use crate::domain::repositories::{IngestionJobRepository, IngestionJobRepositoryError};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{IngestionJobModel, NewIngestionJobModel};
use crate::infrastructure::database::schema::ingestion_jobs::dsl::*;

pub struct PostgresIngestionJobRepository {
    pool: DbPool,
}

impl PostgresIngestionJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngestionJobRepository for PostgresIngestionJobRepository {
    async fn save(&self, job: &IngestionJob) -> Result<Uuid, IngestionJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        let new_job = NewIngestionJobModel::from(job);

        let inserted: IngestionJobModel = diesel::insert_into(ingestion_jobs)
            .values(&new_job)
            .get_result(&mut conn)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        Ok(inserted.id)
    }

    async fn find_by_id(
        &self,
        job_id: Uuid,
    ) -> Result<Option<IngestionJob>, IngestionJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        let result = ingestion_jobs
            .find(job_id)
            .first::<IngestionJobModel>(&mut conn)
            .optional()
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let job = IngestionJob::try_from(model)
                    .map_err(IngestionJobRepositoryError::ValidationError)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    async fn find_unfinished(&self) -> Result<Vec<IngestionJob>, IngestionJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        let models = ingestion_jobs
            .filter(status.eq_any(["pending", "processing"]))
            .order(created_at.asc())
            .load::<IngestionJobModel>(&mut conn)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            result.push(
                IngestionJob::try_from(model)
                    .map_err(IngestionJobRepositoryError::ValidationError)?,
            );
        }
        Ok(result)
    }

    async fn update(&self, job: &IngestionJob) -> Result<(), IngestionJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewIngestionJobModel::from(job);

        diesel::update(ingestion_jobs.find(job.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| IngestionJobRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
