use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatbotHandler;

pub fn chatbot_routes(handler: Arc<ChatbotHandler>) -> Router {
    Router::new()
        .route("/chatbots", post(ChatbotHandler::create_chatbot))
        .route("/chatbots", get(ChatbotHandler::list_chatbots))
        .route("/chatbots/{chatbot_id}", get(ChatbotHandler::get_chatbot))
        .route(
            "/chatbots/{chatbot_id}",
            delete(ChatbotHandler::delete_chatbot),
        )
        .with_state(handler)
}
