use std::sync::Arc;

use crate::application::ports::{IngestionQueue, QueuedIngestion};
use crate::application::services::IngestionService;
use crate::domain::repositories::IngestionJobRepository;
use crate::infrastructure::messaging::IngestionReceiver;

/// Fixed pool of tokio tasks draining the ingestion queue. Each job is
/// fully isolated: an error settles that one document and the worker moves
/// on to the next.
pub struct IngestionWorkerPool {
    receiver: Arc<IngestionReceiver>,
    service: Arc<IngestionService>,
    worker_count: usize,
}

impl IngestionWorkerPool {
    pub fn new(receiver: Arc<IngestionReceiver>, service: Arc<IngestionService>) -> Self {
        Self {
            receiver,
            service,
            worker_count: 3,
        }
    }

    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count.max(1);
        self
    }

    pub async fn start(&self) {
        tracing::info!(workers = self.worker_count, "Starting ingestion workers");

        let mut handles = Vec::new();
        for worker_id in 0..self.worker_count {
            let receiver = self.receiver.clone();
            let service = self.service.clone();
            handles.push(tokio::spawn(async move {
                worker_loop(worker_id, receiver, service).await;
            }));
        }

        for (worker_id, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!(worker_id, error = %e, "Ingestion worker panicked");
            }
        }

        tracing::info!("Ingestion workers stopped");
    }
}

async fn worker_loop(
    worker_id: usize,
    receiver: Arc<IngestionReceiver>,
    service: Arc<IngestionService>,
) {
    tracing::debug!(worker_id, "Worker started");

    while let Some(work) = receiver.recv().await {
        tracing::debug!(
            worker_id,
            job_id = %work.job_id,
            document_id = %work.document_id,
            "Picked up ingestion job"
        );

        if let Err(e) = service.ingest(work.job_id, work.document_id).await {
            // Pipeline failures settle in the document row; this is only the
            // bookkeeping path (row vanished, repository down).
            tracing::error!(
                worker_id,
                job_id = %work.job_id,
                error = %e,
                "Ingestion job bookkeeping failed"
            );
        }
    }

    tracing::debug!(worker_id, "Worker stopped, queue closed");
}

/// Re-enqueue jobs that were pending or in flight when the process died, so
/// a restart resumes them instead of leaving documents stuck mid-pipeline.
pub async fn recover_interrupted_jobs(
    jobs: &Arc<dyn IngestionJobRepository>,
    queue: &Arc<dyn IngestionQueue>,
) -> Result<usize, String> {
    let unfinished = jobs
        .find_unfinished()
        .await
        .map_err(|e| e.to_string())?;

    let count = unfinished.len();
    for job in unfinished {
        queue
            .enqueue(QueuedIngestion {
                job_id: job.id(),
                document_id: job.document_id(),
            })
            .map_err(|e| e.to_string())?;
    }

    if count > 0 {
        tracing::info!(count, "Re-enqueued interrupted ingestion jobs");
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::IngestionJob;
    use crate::infrastructure::messaging::MpscIngestionQueue;
    use crate::test_support::InMemoryIngestionJobRepository;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_recovery_reenqueues_only_unfinished_jobs() {
        let jobs: Arc<dyn IngestionJobRepository> =
            Arc::new(InMemoryIngestionJobRepository::default());

        let pending = IngestionJob::new(Uuid::new_v4());
        jobs.save(&pending).await.unwrap();

        let mut in_flight = IngestionJob::new(Uuid::new_v4());
        in_flight.start().unwrap();
        jobs.save(&in_flight).await.unwrap();

        let mut done = IngestionJob::new(Uuid::new_v4());
        done.start().unwrap();
        done.complete().unwrap();
        jobs.save(&done).await.unwrap();

        let (queue, receiver) = MpscIngestionQueue::create_pair();
        let queue: Arc<dyn IngestionQueue> = Arc::new(queue);

        let count = recover_interrupted_jobs(&jobs, &queue).await.unwrap();
        assert_eq!(count, 2);

        let mut recovered = vec![
            receiver.recv().await.unwrap().job_id,
            receiver.recv().await.unwrap().job_id,
        ];
        recovered.sort();
        let mut expected = vec![pending.id(), in_flight.id()];
        expected.sort();
        assert_eq!(recovered, expected);
    }
}
