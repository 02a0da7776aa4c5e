use async_trait::async_trait;

use crate::domain::value_objects::{Namespace, TextChunk};

#[derive(Debug)]
pub enum VectorIndexError {
    RateLimited,
    QuotaExhausted,
    HttpError(String),
    MalformedResponse(String),
}

impl std::fmt::Display for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorIndexError::RateLimited => write!(f, "Vector store rate limit exceeded"),
            VectorIndexError::QuotaExhausted => write!(f, "Vector store quota exhausted"),
            VectorIndexError::HttpError(msg) => write!(f, "Vector store error: {}", msg),
            VectorIndexError::MalformedResponse(msg) => {
                write!(f, "Malformed vector store response: {}", msg)
            }
        }
    }
}

impl std::error::Error for VectorIndexError {}

/// One chunk returned by a similarity query, with the metadata it was
/// indexed under.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub source: String,
    pub ordinal: u32,
    pub text: String,
    pub score: f32,
}

/// The external vector store. The service computes embeddings itself, for
/// upserts and queries alike, which is what keeps query vectors in the same
/// embedding space as the indexed chunks.
///
/// Upserts carry no partial-success contract: on error the caller must treat
/// the whole batch as not indexed.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Embed and store every chunk under the namespace. Returns the number
    /// of chunks submitted.
    async fn upsert(
        &self,
        namespace: &Namespace,
        chunks: &[TextChunk],
    ) -> Result<usize, VectorIndexError>;

    /// Top-k most similar chunks to `text` within the namespace.
    async fn query(
        &self,
        namespace: &Namespace,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError>;

    /// Remove every vector under the namespace.
    async fn delete_namespace(&self, namespace: &Namespace) -> Result<(), VectorIndexError>;
}
