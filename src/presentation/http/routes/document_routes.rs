use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route(
            "/chatbots/{chatbot_id}/documents",
            post(DocumentHandler::upload_document),
        )
        .route(
            "/chatbots/{chatbot_id}/documents",
            get(DocumentHandler::list_documents),
        )
        .route("/documents/{document_id}", get(DocumentHandler::get_document))
        .route(
            "/documents/{document_id}",
            delete(DocumentHandler::delete_document),
        )
        .with_state(handler)
}
