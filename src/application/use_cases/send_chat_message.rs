use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::{ChatError, ChatOutcome, ChatService};

#[derive(Debug)]
pub enum SendChatMessageError {
    ValidationError(String),
    ChatError(ChatError),
}

impl std::fmt::Display for SendChatMessageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendChatMessageError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SendChatMessageError::ChatError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SendChatMessageError {}

impl From<ChatError> for SendChatMessageError {
    fn from(error: ChatError) -> Self {
        SendChatMessageError::ChatError(error)
    }
}

#[derive(Debug, Clone)]
pub struct SendChatMessageRequest {
    pub workspace_id: Uuid,
    pub chatbot_id: Uuid,
    pub conversation_id: Option<Uuid>,
    pub visitor_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResponse {
    pub outcome: ChatOutcome,
}

pub struct SendChatMessageUseCase {
    chat_service: Arc<ChatService>,
}

impl SendChatMessageUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(
        &self,
        request: SendChatMessageRequest,
    ) -> Result<SendChatMessageResponse, SendChatMessageError> {
        if request.message.trim().is_empty() {
            return Err(SendChatMessageError::ValidationError(
                "Message cannot be empty".to_string(),
            ));
        }

        let visitor_id = request
            .visitor_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let outcome = self
            .chat_service
            .send(
                request.workspace_id,
                request.chatbot_id,
                request.conversation_id,
                visitor_id,
                request.message,
            )
            .await?;

        Ok(SendChatMessageResponse { outcome })
    }
}
