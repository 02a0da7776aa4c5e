use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::messaging::IngestionWorkerPool;
use crate::presentation::http::handlers::{
    ChatHandler, ChatbotHandler, CredentialHandler, DocumentHandler,
};
use crate::presentation::http::routes::{
    chat_routes, chatbot_routes, credential_routes, document_routes, health_routes,
};

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub struct HttpServer {
    chatbot_handler: Arc<ChatbotHandler>,
    document_handler: Arc<DocumentHandler>,
    chat_handler: Arc<ChatHandler>,
    credential_handler: Arc<CredentialHandler>,
    worker_pool: Arc<IngestionWorkerPool>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        chatbot_handler: Arc<ChatbotHandler>,
        document_handler: Arc<DocumentHandler>,
        chat_handler: Arc<ChatHandler>,
        credential_handler: Arc<CredentialHandler>,
        worker_pool: Arc<IngestionWorkerPool>,
        port: u16,
    ) -> Self {
        Self {
            chatbot_handler,
            document_handler,
            chat_handler,
            credential_handler,
            worker_pool,
            port,
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        // Ingestion workers outlive any single request; they stop when the
        // process does.
        let worker_pool = self.worker_pool.clone();
        tokio::spawn(async move {
            worker_pool.start().await;
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let api = Router::new()
            .merge(chatbot_routes(self.chatbot_handler))
            .merge(document_routes(self.document_handler))
            .merge(chat_routes(self.chat_handler))
            .merge(credential_routes(self.credential_handler));

        let app = Router::new()
            .merge(health_routes())
            .nest("/api/v1", api)
            .layer(cors)
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!(%addr, "Listening");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
