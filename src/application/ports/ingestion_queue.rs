use uuid::Uuid;

#[derive(Debug)]
pub enum IngestionQueueError {
    Closed,
}

impl std::fmt::Display for IngestionQueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionQueueError::Closed => write!(f, "Ingestion queue is closed"),
        }
    }
}

impl std::error::Error for IngestionQueueError {}

/// A unit of ingestion work handed to the worker pool. The durable state
/// lives in the job ledger; this is only the in-memory handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedIngestion {
    pub job_id: Uuid,
    pub document_id: Uuid,
}

pub trait IngestionQueue: Send + Sync {
    fn enqueue(&self, work: QueuedIngestion) -> Result<(), IngestionQueueError>;
}
