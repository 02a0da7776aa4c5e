use axum::{Json, Router, routing::get};

use crate::presentation::http::dto::{ApiResponse, HealthResponseDto};

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<ApiResponse<HealthResponseDto>> {
    Json(ApiResponse::success(HealthResponseDto {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
