pub mod chat_handler;
pub mod chatbot_handler;
pub mod credential_handler;
pub mod document_handler;

pub use chat_handler::ChatHandler;
pub use chatbot_handler::ChatbotHandler;
pub use credential_handler::CredentialHandler;
pub use document_handler::DocumentHandler;
