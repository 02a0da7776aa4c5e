use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    ChatCompletion, ChatProvider, ChatProviderError, ChatRequest, TokenUsage,
};

use super::classify_status;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages adapter. The system text rides in its own field, and
/// total tokens are the sum of the reported input and output counts.
pub struct AnthropicChatProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: i64,
    output_tokens: i64,
}

impl AnthropicChatProvider {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), timeout_secs)
    }

    pub fn with_base_url(base_url: String, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl ChatProvider for AnthropicChatProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatProviderError> {
        let body = AnthropicRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: request
                .messages
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.clone(),
                    content: m.content.clone(),
                })
                .collect(),
            system: request.system.as_deref(),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &request.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatProviderError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status, message));
        }

        let data: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| ChatProviderError::MalformedResponse(e.to_string()))?;

        let content = data
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| {
                ChatProviderError::MalformedResponse("response carried no content".to_string())
            })?;

        let usage = TokenUsage {
            prompt_tokens: data.usage.input_tokens,
            completion_tokens: data.usage.output_tokens,
            total_tokens: data.usage.input_tokens + data.usage.output_tokens,
        };

        Ok(ChatCompletion { content, usage })
    }
}
