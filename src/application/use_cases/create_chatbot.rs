use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRepository, ChatbotRepositoryError};

#[derive(Debug)]
pub enum CreateChatbotError {
    ValidationError(String),
    RepositoryError(String),
}

impl std::fmt::Display for CreateChatbotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateChatbotError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            CreateChatbotError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateChatbotError {}

impl From<ChatbotRepositoryError> for CreateChatbotError {
    fn from(error: ChatbotRepositoryError) -> Self {
        CreateChatbotError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateChatbotRequest {
    pub workspace_id: Uuid,
    pub name: String,
    pub system_prompt: String,
    pub model: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct CreateChatbotResponse {
    pub chatbot: Chatbot,
}

pub struct CreateChatbotUseCase {
    chatbots: Arc<dyn ChatbotRepository>,
}

impl CreateChatbotUseCase {
    pub fn new(chatbots: Arc<dyn ChatbotRepository>) -> Self {
        Self { chatbots }
    }

    pub async fn execute(
        &self,
        request: CreateChatbotRequest,
    ) -> Result<CreateChatbotResponse, CreateChatbotError> {
        if request.name.trim().is_empty() {
            return Err(CreateChatbotError::ValidationError(
                "Chatbot name cannot be empty".to_string(),
            ));
        }
        if request.model.trim().is_empty() {
            return Err(CreateChatbotError::ValidationError(
                "Model name cannot be empty".to_string(),
            ));
        }

        let chatbot = Chatbot::new(
            request.workspace_id,
            request.name,
            request.system_prompt,
            request.model,
            request.temperature,
        );

        self.chatbots.save(&chatbot).await?;

        Ok(CreateChatbotResponse { chatbot })
    }
}
