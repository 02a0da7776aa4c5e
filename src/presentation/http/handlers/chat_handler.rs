use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::ChatProviderError;
use crate::application::services::ChatError;
use crate::application::use_cases::{
    SendChatMessageUseCase,
    send_chat_message::{SendChatMessageError, SendChatMessageRequest},
};
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::chat_dto::{ChatMessageDto, ChatReplyDto};
use crate::presentation::http::tenant::WorkspaceId;

pub struct ChatHandler {
    send_use_case: Arc<SendChatMessageUseCase>,
}

impl ChatHandler {
    pub fn new(send_use_case: Arc<SendChatMessageUseCase>) -> Self {
        Self { send_use_case }
    }

    pub async fn send_message(
        State(handler): State<Arc<ChatHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(chatbot_id): Path<Uuid>,
        Json(body): Json<ChatMessageDto>,
    ) -> impl IntoResponse {
        let request = SendChatMessageRequest {
            workspace_id,
            chatbot_id,
            conversation_id: body.conversation_id,
            visitor_id: body.visitor_id,
            message: body.message,
        };

        match handler.send_use_case.execute(request).await {
            Ok(response) => {
                let dto = ChatReplyDto::from(response.outcome);
                (StatusCode::OK, Json(ApiResponse::success(dto)))
            }
            Err(e) => chat_error_response(e),
        }
    }
}

/// Chat failures surface synchronously as the HTTP response, with a hint to
/// check credential configuration where that is the likely fix.
fn chat_error_response(
    error: SendChatMessageError,
) -> (StatusCode, Json<ApiResponse<ChatReplyDto>>) {
    let (status, code, message, details) = match &error {
        SendChatMessageError::ValidationError(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            msg.clone(),
            None,
        ),
        SendChatMessageError::ChatError(chat_error) => match chat_error {
            ChatError::ChatbotNotFound(_) | ChatError::ConversationNotFound(_) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", chat_error.to_string(), None)
            }
            ChatError::UnsupportedModel(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_MODEL",
                chat_error.to_string(),
                None,
            ),
            ChatError::MissingCredential(provider) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_CREDENTIAL",
                chat_error.to_string(),
                Some(format!(
                    "Add an active {} API key in credential settings",
                    provider
                )),
            ),
            ChatError::CredentialLimitReached(provider) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CREDENTIAL_LIMIT_REACHED",
                chat_error.to_string(),
                Some(format!(
                    "Raise or clear the spend limit on the {} credential",
                    provider
                )),
            ),
            ChatError::VendorError(vendor_error) => vendor_error_parts(vendor_error),
            ChatError::RetrievalError(_) => (
                StatusCode::BAD_GATEWAY,
                "RETRIEVAL_FAILED",
                chat_error.to_string(),
                None,
            ),
            ChatError::VaultError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CREDENTIAL_UNREADABLE",
                chat_error.to_string(),
                Some("Re-enter the provider API key".to_string()),
            ),
            ChatError::RepositoryError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHAT_FAILED",
                chat_error.to_string(),
                None,
            ),
        },
    };

    (status, Json(ApiResponse::error(code, message, details)))
}

fn vendor_error_parts(
    error: &ChatProviderError,
) -> (StatusCode, &'static str, String, Option<String>) {
    match error {
        ChatProviderError::RateLimited(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            "VENDOR_RATE_LIMITED",
            error.to_string(),
            Some("The AI provider is rate limiting this key; retry shortly".to_string()),
        ),
        ChatProviderError::QuotaExhausted(_) => (
            StatusCode::PAYMENT_REQUIRED,
            "VENDOR_QUOTA_EXHAUSTED",
            error.to_string(),
            Some("Check the billing status of the provider account".to_string()),
        ),
        ChatProviderError::Upstream { status, .. } if *status == 401 || *status == 403 => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VENDOR_AUTH_FAILED",
            error.to_string(),
            Some("Check the provider API key in credential settings".to_string()),
        ),
        _ => (
            StatusCode::BAD_GATEWAY,
            "VENDOR_ERROR",
            error.to_string(),
            None,
        ),
    }
}
