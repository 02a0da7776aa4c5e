use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    ChatCompletion, ChatProvider, ChatProviderError, ChatRequest, TokenUsage,
};

use super::classify_status;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google generateContent adapter. Assistant turns map to the `model` role
/// and the key travels as a query parameter, both per the Gemini API.
pub struct GoogleChatProvider {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct GoogleRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GoogleContent>,
    contents: Vec<GoogleContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GoogleGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GoogleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GooglePart>,
}

#[derive(Serialize, Deserialize)]
struct GooglePart {
    text: String,
}

#[derive(Serialize)]
struct GoogleGenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct GoogleResponse {
    candidates: Vec<GoogleCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: GoogleUsage,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

#[derive(Deserialize)]
struct GoogleUsage {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: i64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: i64,
    #[serde(rename = "totalTokenCount", default)]
    total_token_count: i64,
}

impl GoogleChatProvider {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), timeout_secs)
    }

    pub fn with_base_url(base_url: String, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn build_contents(request: &ChatRequest) -> Vec<GoogleContent> {
        request
            .messages
            .iter()
            .map(|m| GoogleContent {
                role: Some(if m.role == "assistant" {
                    "model".to_string()
                } else {
                    "user".to_string()
                }),
                parts: vec![GooglePart {
                    text: m.content.clone(),
                }],
            })
            .collect()
    }
}

#[async_trait]
impl ChatProvider for GoogleChatProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatProviderError> {
        let body = GoogleRequest {
            system_instruction: request.system.as_ref().map(|system| GoogleContent {
                role: None,
                parts: vec![GooglePart {
                    text: system.clone(),
                }],
            }),
            contents: Self::build_contents(request),
            generation_config: GoogleGenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, request.model
            ))
            .query(&[("key", request.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatProviderError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status, message));
        }

        let data: GoogleResponse = response
            .json()
            .await
            .map_err(|e| ChatProviderError::MalformedResponse(e.to_string()))?;

        let content = data
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| {
                ChatProviderError::MalformedResponse("response carried no candidates".to_string())
            })?;

        Ok(ChatCompletion {
            content,
            usage: TokenUsage {
                prompt_tokens: data.usage_metadata.prompt_token_count,
                completion_tokens: data.usage_metadata.candidates_token_count,
                total_tokens: data.usage_metadata.total_token_count,
            },
        })
    }
}
