use tracing_subscriber::EnvFilter;

use ragdesk::infrastructure::{AppContainer, Settings};
use ragdesk::presentation::http::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let container = AppContainer::new(&settings)?;

    let recovered = container.recover_interrupted_jobs().await?;
    if recovered > 0 {
        tracing::info!(recovered, "Resuming ingestion jobs from previous run");
    }

    let server = HttpServer::new(
        container.chatbot_handler.clone(),
        container.document_handler.clone(),
        container.chat_handler.clone(),
        container.credential_handler.clone(),
        container.worker_pool.clone(),
        settings.bind_port,
    );

    server.run().await
}
