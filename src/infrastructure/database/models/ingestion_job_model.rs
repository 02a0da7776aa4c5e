use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::IngestionJob;
use crate::domain::value_objects::DocumentStatus;
use crate::infrastructure::database::schema::ingestion_jobs;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = ingestion_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct IngestionJobModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = ingestion_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewIngestionJobModel {
    pub id: Option<Uuid>,
    pub document_id: Uuid,
    pub status: String,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl From<&IngestionJob> for NewIngestionJobModel {
    fn from(job: &IngestionJob) -> Self {
        Self {
            id: Some(job.id()),
            document_id: job.document_id(),
            status: job.status().as_str().to_string(),
            error_message: job.status().error_message().map(|e| e.to_string()),
            created_at: job.created_at(),
            started_at: job.started_at(),
            finished_at: job.finished_at(),
        }
    }
}

impl TryFrom<IngestionJobModel> for IngestionJob {
    type Error = String;

    fn try_from(model: IngestionJobModel) -> Result<Self, Self::Error> {
        let status = DocumentStatus::from_parts(&model.status, model.error_message.as_deref())?;

        Ok(IngestionJob::from_database(
            model.id,
            model.document_id,
            status,
            model.created_at,
            model.started_at,
            model.finished_at,
        ))
    }
}
