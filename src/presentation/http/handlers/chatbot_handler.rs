use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    CreateChatbotUseCase, DeleteChatbotUseCase, GetChatbotUseCase, ListChatbotsUseCase,
    create_chatbot::{CreateChatbotError, CreateChatbotRequest},
    delete_chatbot::{DeleteChatbotError, DeleteChatbotRequest},
    get_chatbot::{GetChatbotError, GetChatbotRequest},
    list_chatbots::ListChatbotsRequest,
};
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::chatbot_dto::{
    ChatbotListResponseDto, ChatbotResponseDto, CreateChatbotDto,
};
use crate::presentation::http::tenant::WorkspaceId;

pub struct ChatbotHandler {
    create_use_case: Arc<CreateChatbotUseCase>,
    get_use_case: Arc<GetChatbotUseCase>,
    list_use_case: Arc<ListChatbotsUseCase>,
    delete_use_case: Arc<DeleteChatbotUseCase>,
}

impl ChatbotHandler {
    pub fn new(
        create_use_case: Arc<CreateChatbotUseCase>,
        get_use_case: Arc<GetChatbotUseCase>,
        list_use_case: Arc<ListChatbotsUseCase>,
        delete_use_case: Arc<DeleteChatbotUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_use_case,
            list_use_case,
            delete_use_case,
        }
    }

    pub async fn create_chatbot(
        State(handler): State<Arc<ChatbotHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Json(body): Json<CreateChatbotDto>,
    ) -> impl IntoResponse {
        let request = CreateChatbotRequest {
            workspace_id,
            name: body.name,
            system_prompt: body.system_prompt,
            model: body.model,
            temperature: body.temperature,
        };

        match handler.create_use_case.execute(request).await {
            Ok(response) => {
                let dto = ChatbotResponseDto::from(response.chatbot);
                (StatusCode::CREATED, Json(ApiResponse::success(dto)))
            }
            Err(CreateChatbotError::ValidationError(msg)) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("VALIDATION_FAILED", msg, None)),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CREATE_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn get_chatbot(
        State(handler): State<Arc<ChatbotHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(chatbot_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = GetChatbotRequest {
            workspace_id,
            chatbot_id,
        };

        match handler.get_use_case.execute(request).await {
            Ok(response) => {
                let dto = ChatbotResponseDto::from(response.chatbot);
                (StatusCode::OK, Json(ApiResponse::success(dto)))
            }
            Err(GetChatbotError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Chatbot {} not found", chatbot_id),
                    None,
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("FETCH_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn list_chatbots(
        State(handler): State<Arc<ChatbotHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
    ) -> impl IntoResponse {
        let request = ListChatbotsRequest { workspace_id };

        match handler.list_use_case.execute(request).await {
            Ok(response) => {
                let dto = ChatbotListResponseDto {
                    chatbots: response
                        .chatbots
                        .into_iter()
                        .map(ChatbotResponseDto::from)
                        .collect(),
                };
                (StatusCode::OK, Json(ApiResponse::success(dto)))
            }
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("LIST_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn delete_chatbot(
        State(handler): State<Arc<ChatbotHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(chatbot_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = DeleteChatbotRequest {
            workspace_id,
            chatbot_id,
        };

        match handler.delete_use_case.execute(request).await {
            Ok(()) => (StatusCode::NO_CONTENT, Json(ApiResponse::success(()))),
            Err(DeleteChatbotError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Chatbot {} not found", chatbot_id),
                    None,
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("DELETE_FAILED", e.to_string(), None)),
            ),
        }
    }
}
