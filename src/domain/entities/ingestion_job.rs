use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DocumentStatus;

/// Durable ledger entry for one document's ingestion run. Persisted at
/// enqueue time so a restarted process can find and re-enqueue work that was
/// in flight when it died, instead of leaving the document stuck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionJob {
    id: Uuid,
    document_id: Uuid,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl IngestionJob {
    pub fn new(document_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            status: DocumentStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Rebuild a job from persisted columns.
    pub fn from_database(
        id: Uuid,
        document_id: Uuid,
        status: DocumentStatus,
        created_at: DateTime<Utc>,
        started_at: Option<DateTime<Utc>>,
        finished_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            document_id,
            status,
            created_at,
            started_at,
            finished_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn start(&mut self) -> Result<(), String> {
        if !self.status.can_transition_to(&DocumentStatus::Processing) {
            return Err(format!("Job in {} state cannot start", self.status));
        }
        self.status = DocumentStatus::Processing;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), String> {
        if !self.status.can_transition_to(&DocumentStatus::Completed) {
            return Err(format!("Job in {} state cannot complete", self.status));
        }
        self.status = DocumentStatus::Completed;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    pub fn fail(&mut self, error: String) -> Result<(), String> {
        let failed = DocumentStatus::Failed(error);
        if !self.status.can_transition_to(&failed) {
            return Err(format!("Job in {} state cannot fail", self.status));
        }
        self.status = failed;
        self.finished_at = Some(Utc::now());
        Ok(())
    }
}
