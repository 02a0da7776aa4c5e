use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    DeleteDocumentUseCase, GetDocumentUseCase, ListDocumentsUseCase, UploadDocumentUseCase,
    delete_document::{DeleteDocumentError, DeleteDocumentRequest},
    get_document::{GetDocumentError, GetDocumentRequest},
    list_documents::{ListDocumentsError, ListDocumentsRequest},
    upload_document::{UploadDocumentError, UploadDocumentRequest},
};
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::document_dto::{
    DocumentListResponseDto, DocumentResponseDto, UploadAcceptedDto,
};
use crate::presentation::http::tenant::WorkspaceId;

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    get_use_case: Arc<GetDocumentUseCase>,
    list_use_case: Arc<ListDocumentsUseCase>,
    delete_use_case: Arc<DeleteDocumentUseCase>,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        get_use_case: Arc<GetDocumentUseCase>,
        list_use_case: Arc<ListDocumentsUseCase>,
        delete_use_case: Arc<DeleteDocumentUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            get_use_case,
            list_use_case,
            delete_use_case,
        }
    }

    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(chatbot_id): Path<Uuid>,
        mut multipart: Multipart,
    ) -> impl IntoResponse {
        while let Ok(Some(field)) = multipart.next_field().await {
            let Some(file_name) = field.file_name().map(|name| name.to_string()) else {
                continue;
            };
            let content_type = field.content_type().map(|ct| ct.to_string());

            let Ok(data) = field.bytes().await else {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "UPLOAD_FAILED",
                        "Failed to read the uploaded file".to_string(),
                        None,
                    )),
                );
            };

            let request = UploadDocumentRequest {
                workspace_id,
                chatbot_id,
                file_name,
                content_type,
                data: data.to_vec(),
            };

            return match handler.upload_use_case.execute(request).await {
                Ok(response) => {
                    let dto = UploadAcceptedDto {
                        document: DocumentResponseDto::from(response.document),
                        job_id: response.job_id,
                        message: "Document accepted; ingestion runs in the background"
                            .to_string(),
                    };
                    (StatusCode::ACCEPTED, Json(ApiResponse::success(dto)))
                }
                Err(UploadDocumentError::ChatbotNotFound(_)) => (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::error(
                        "NOT_FOUND",
                        format!("Chatbot {} not found", chatbot_id),
                        None,
                    )),
                ),
                Err(UploadDocumentError::ValidationError(msg)) => (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("VALIDATION_FAILED", msg, None)),
                ),
                Err(e) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("UPLOAD_FAILED", e.to_string(), None)),
                ),
            };
        }

        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "NO_FILE_PROVIDED",
                "No file provided in the request".to_string(),
                None,
            )),
        )
    }

    pub async fn get_document(
        State(handler): State<Arc<DocumentHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(document_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = GetDocumentRequest {
            workspace_id,
            document_id,
        };

        match handler.get_use_case.execute(request).await {
            Ok(response) => {
                let dto = DocumentResponseDto::from(response.document);
                (StatusCode::OK, Json(ApiResponse::success(dto)))
            }
            Err(GetDocumentError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Document {} not found", document_id),
                    None,
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("FETCH_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(chatbot_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = ListDocumentsRequest {
            workspace_id,
            chatbot_id,
        };

        match handler.list_use_case.execute(request).await {
            Ok(response) => {
                let dto = DocumentListResponseDto {
                    documents: response
                        .documents
                        .into_iter()
                        .map(DocumentResponseDto::from)
                        .collect(),
                };
                (StatusCode::OK, Json(ApiResponse::success(dto)))
            }
            Err(ListDocumentsError::ChatbotNotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Chatbot {} not found", chatbot_id),
                    None,
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("LIST_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(document_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = DeleteDocumentRequest {
            workspace_id,
            document_id,
        };

        match handler.delete_use_case.execute(request).await {
            Ok(()) => (StatusCode::NO_CONTENT, Json(ApiResponse::success(()))),
            Err(DeleteDocumentError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Document {} not found", document_id),
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
