use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Conversation;

#[derive(Debug)]
pub enum ConversationRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConversationRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationRepositoryError::NotFound(id) => {
                write!(f, "Conversation not found: {}", id)
            }
            ConversationRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
            ConversationRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConversationRepositoryError {}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    async fn save(&self, conversation: &Conversation)
    -> Result<Uuid, ConversationRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Conversation>, ConversationRepositoryError>;

    async fn update(&self, conversation: &Conversation)
    -> Result<(), ConversationRepositoryError>;
}
