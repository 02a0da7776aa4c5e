use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{RetrievedChunk, VectorIndex, VectorIndexError};
use crate::domain::value_objects::{Namespace, TextChunk};

#[derive(Debug, Clone)]
pub struct VectorServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_factor: f64,
}

impl Default for VectorServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8600".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_retries: 3,
            backoff_factor: 1.5,
        }
    }
}

#[derive(Serialize)]
struct UpsertItem<'a> {
    id: String,
    text: &'a str,
    metadata: ChunkMetadata<'a>,
}

#[derive(Serialize)]
struct ChunkMetadata<'a> {
    source: &'a str,
    ordinal: u32,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    items: Vec<UpsertItem<'a>>,
}

#[derive(Deserialize)]
struct UpsertResponse {
    upserted: usize,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
    top_k: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    text: String,
    score: f32,
    metadata: QueryMatchMetadata,
}

#[derive(Deserialize)]
struct QueryMatchMetadata {
    source: String,
    ordinal: u32,
}

/// HTTP client for the external vector service. The service computes the
/// embeddings on both the upsert and query paths, so everything stored and
/// everything searched lives in one embedding space.
///
/// Transport errors are retried with multiplicative backoff up to the
/// configured cap; HTTP error statuses are not retried, they are classified
/// and surfaced.
pub struct HttpVectorIndex {
    client: Client,
    config: VectorServiceConfig,
}

impl HttpVectorIndex {
    pub fn new(config: VectorServiceConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn namespace_url(&self, namespace: &Namespace, suffix: &str) -> String {
        format!(
            "{}/v1/namespaces/{}{}",
            self.config.base_url.trim_end_matches('/'),
            namespace.as_str(),
            suffix
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send_with_retry(
        &self,
        build: impl Fn() -> reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, VectorIndexError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.authorized(build()).send().await {
                Ok(response) => return self.classify(response),
                Err(e) => {
                    if attempts > self.config.max_retries {
                        return Err(VectorIndexError::HttpError(e.to_string()));
                    }
                    let backoff = Duration::from_millis(
                        (self.config.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    fn classify(&self, response: reqwest::Response) -> Result<reqwest::Response, VectorIndexError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::TOO_MANY_REQUESTS => Err(VectorIndexError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => Err(VectorIndexError::QuotaExhausted),
            status => Err(VectorIndexError::HttpError(format!(
                "vector service returned {}",
                status
            ))),
        }
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn upsert(
        &self,
        namespace: &Namespace,
        chunks: &[TextChunk],
    ) -> Result<usize, VectorIndexError> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let body = UpsertRequest {
            items: chunks
                .iter()
                .map(|chunk| UpsertItem {
                    id: format!("{}#{}", chunk.source(), chunk.ordinal()),
                    text: chunk.text(),
                    metadata: ChunkMetadata {
                        source: chunk.source(),
                        ordinal: chunk.ordinal(),
                    },
                })
                .collect(),
        };

        let url = self.namespace_url(namespace, "/upsert");
        let response = self
            .send_with_retry(|| self.client.post(&url).json(&body))
            .await?;

        let parsed: UpsertResponse = response
            .json()
            .await
            .map_err(|e| VectorIndexError::MalformedResponse(e.to_string()))?;

        Ok(parsed.upserted)
    }

    async fn query(
        &self,
        namespace: &Namespace,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError> {
        let body = QueryRequest { text, top_k };
        let url = self.namespace_url(namespace, "/query");

        let response = self
            .send_with_retry(|| self.client.post(&url).json(&body))
            .await?;

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| VectorIndexError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .matches
            .into_iter()
            .map(|m| RetrievedChunk {
                source: m.metadata.source,
                ordinal: m.metadata.ordinal,
                text: m.text,
                score: m.score,
            })
            .collect())
    }

    async fn delete_namespace(&self, namespace: &Namespace) -> Result<(), VectorIndexError> {
        let url = self.namespace_url(namespace, "");
        self.send_with_retry(|| self.client.delete(&url)).await?;
        Ok(())
    }
}
