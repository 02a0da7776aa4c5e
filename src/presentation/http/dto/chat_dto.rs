use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::ChatOutcome;

#[derive(Debug, Deserialize)]
pub struct ChatMessageDto {
    pub message: String,
    pub conversation_id: Option<Uuid>,
    pub visitor_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenUsageDto {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

#[derive(Debug, Serialize)]
pub struct ChatReplyDto {
    pub reply: String,
    pub conversation_id: Uuid,
    pub sources: Vec<String>,
    pub usage: TokenUsageDto,
}

impl From<ChatOutcome> for ChatReplyDto {
    fn from(outcome: ChatOutcome) -> Self {
        Self {
            reply: outcome.reply,
            conversation_id: outcome.conversation_id,
            sources: outcome.sources,
            usage: TokenUsageDto {
                prompt_tokens: outcome.usage.prompt_tokens,
                completion_tokens: outcome.usage.completion_tokens,
                total_tokens: outcome.usage.total_tokens,
            },
        }
    }
}
