use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};
use uuid::Uuid;

use crate::presentation::http::dto::ApiResponse;

const WORKSPACE_HEADER: &str = "x-workspace-id";

/// The tenant identity for a request, resolved upstream by the auth layer
/// and relayed in a trusted header. Everything workspace-scoped hangs off
/// this value; a request without it never reaches a handler.
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceId(pub Uuid);

impl<S> FromRequestParts<S> for WorkspaceId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(WORKSPACE_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| rejection("missing x-workspace-id header"))?;

        let workspace_id =
            Uuid::parse_str(raw).map_err(|_| rejection("x-workspace-id is not a valid UUID"))?;

        Ok(WorkspaceId(workspace_id))
    }
}

fn rejection(message: &str) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(
            "WORKSPACE_REQUIRED",
            message.to_string(),
            None,
        )),
    )
}
