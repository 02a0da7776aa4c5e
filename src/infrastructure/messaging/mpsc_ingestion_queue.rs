use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use crate::application::ports::{IngestionQueue, IngestionQueueError, QueuedIngestion};

/// In-process handoff between upload handlers and the worker pool. The
/// durable side of the queue is the job ledger; this channel only carries
/// the wake-up.
pub struct MpscIngestionQueue {
    sender: mpsc::UnboundedSender<QueuedIngestion>,
}

pub struct IngestionReceiver {
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<QueuedIngestion>>>,
}

impl MpscIngestionQueue {
    pub fn create_pair() -> (Self, IngestionReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self { sender },
            IngestionReceiver {
                receiver: Arc::new(Mutex::new(receiver)),
            },
        )
    }
}

impl IngestionQueue for MpscIngestionQueue {
    fn enqueue(&self, work: QueuedIngestion) -> Result<(), IngestionQueueError> {
        self.sender
            .send(work)
            .map_err(|_| IngestionQueueError::Closed)
    }
}

impl IngestionReceiver {
    /// Next unit of work, or `None` once every sender is gone.
    pub async fn recv(&self) -> Option<QueuedIngestion> {
        let mut receiver = self.receiver.lock().await;
        receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_enqueued_work_is_received_in_order() {
        let (queue, receiver) = MpscIngestionQueue::create_pair();

        let first = QueuedIngestion {
            job_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
        };
        let second = QueuedIngestion {
            job_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
        };

        queue.enqueue(first).unwrap();
        queue.enqueue(second).unwrap();

        assert_eq!(receiver.recv().await, Some(first));
        assert_eq!(receiver.recv().await, Some(second));
    }

    #[tokio::test]
    async fn test_closed_channel_reports_closed() {
        let (queue, receiver) = MpscIngestionQueue::create_pair();
        drop(receiver);

        let result = queue.enqueue(QueuedIngestion {
            job_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
        });

        assert!(matches!(result, Err(IngestionQueueError::Closed)));
    }
}
