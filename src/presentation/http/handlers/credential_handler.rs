use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    ListCredentialsUseCase, RevokeCredentialUseCase, StoreCredentialUseCase,
    list_credentials::ListCredentialsRequest,
    revoke_credential::{RevokeCredentialError, RevokeCredentialRequest},
    store_credential::{StoreCredentialError, StoreCredentialRequest},
};
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::credential_dto::{
    CredentialListResponseDto, CredentialResponseDto, StoreCredentialDto,
};
use crate::presentation::http::tenant::WorkspaceId;

pub struct CredentialHandler {
    store_use_case: Arc<StoreCredentialUseCase>,
    list_use_case: Arc<ListCredentialsUseCase>,
    revoke_use_case: Arc<RevokeCredentialUseCase>,
}

impl CredentialHandler {
    pub fn new(
        store_use_case: Arc<StoreCredentialUseCase>,
        list_use_case: Arc<ListCredentialsUseCase>,
        revoke_use_case: Arc<RevokeCredentialUseCase>,
    ) -> Self {
        Self {
            store_use_case,
            list_use_case,
            revoke_use_case,
        }
    }

    pub async fn store_credential(
        State(handler): State<Arc<CredentialHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Json(body): Json<StoreCredentialDto>,
    ) -> impl IntoResponse {
        let request = StoreCredentialRequest {
            workspace_id,
            provider: body.provider,
            api_key: body.api_key,
            spend_limit_tokens: body.spend_limit_tokens,
        };

        match handler.store_use_case.execute(request).await {
            Ok(response) => {
                let dto = CredentialResponseDto::from(response.credential);
                (StatusCode::CREATED, Json(ApiResponse::success(dto)))
            }
            Err(StoreCredentialError::ValidationError(msg)) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("VALIDATION_FAILED", msg, None)),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STORE_FAILED", e.to_string(), None)),
            ),
        }
    }

    pub async fn list_credentials(
        State(handler): State<Arc<CredentialHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
    ) -> impl IntoResponse {
        let request = ListCredentialsRequest { workspace_id };

        match handler.list_use_case.execute(request).await {
            Ok(response) => {
                let dto = CredentialListResponseDto {
                    credentials: response
                        .credentials
                        .into_iter()
                        .map(CredentialResponseDto::from)
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

    pub async fn revoke_credential(
        State(handler): State<Arc<CredentialHandler>>,
        WorkspaceId(workspace_id): WorkspaceId,
        Path(credential_id): Path<Uuid>,
    ) -> impl IntoResponse {
        let request = RevokeCredentialRequest {
            workspace_id,
            credential_id,
        };

        match handler.revoke_use_case.execute(request).await {
            Ok(()) => (StatusCode::NO_CONTENT, Json(ApiResponse::success(()))),
            Err(RevokeCredentialError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "NOT_FOUND",
                    format!("Credential {} not found", credential_id),
                    None,
                )),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("REVOKE_FAILED", e.to_string(), None)),
            ),
        }
    }
}
