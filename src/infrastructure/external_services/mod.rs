pub mod extractors;
pub mod providers;
pub mod vector_store;

pub use extractors::CompositeExtractor;
pub use providers::default_registry;
pub use vector_store::{HttpVectorIndex, VectorServiceConfig};
