pub mod chat_dto;
pub mod chatbot_dto;
pub mod credential_dto;
pub mod document_dto;
pub mod response_dto;

pub use response_dto::{ApiResponse, HealthResponseDto};
