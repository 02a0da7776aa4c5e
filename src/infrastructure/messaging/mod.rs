pub mod ingestion_worker;
pub mod mpsc_ingestion_queue;

pub use ingestion_worker::{IngestionWorkerPool, recover_interrupted_jobs};
pub use mpsc_ingestion_queue::{IngestionReceiver, MpscIngestionQueue};
