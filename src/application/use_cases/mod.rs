pub mod create_chatbot;
pub mod delete_chatbot;
pub mod delete_document;
pub mod get_chatbot;
pub mod get_document;
pub mod list_chatbots;
pub mod list_credentials;
pub mod list_documents;
pub mod revoke_credential;
pub mod send_chat_message;
pub mod store_credential;
pub mod upload_document;

pub use create_chatbot::CreateChatbotUseCase;
pub use delete_chatbot::DeleteChatbotUseCase;
pub use delete_document::DeleteDocumentUseCase;
pub use get_chatbot::GetChatbotUseCase;
pub use get_document::GetDocumentUseCase;
pub use list_chatbots::ListChatbotsUseCase;
pub use list_credentials::ListCredentialsUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use revoke_credential::RevokeCredentialUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use store_credential::StoreCredentialUseCase;
pub use upload_document::UploadDocumentUseCase;
