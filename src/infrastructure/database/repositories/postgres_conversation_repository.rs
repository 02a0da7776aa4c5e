use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Conversation;
use crate::domain::repositories::{ConversationRepository, ConversationRepositoryError};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{ConversationModel, NewConversationModel};
use crate::infrastructure::database::schema::conversations::dsl::*;

pub struct PostgresConversationRepository {
    pool: DbPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn save(
        &self,
        conversation: &Conversation,
    ) -> Result<Uuid, ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let new_conversation = NewConversationModel::try_from(conversation)
            .map_err(ConversationRepositoryError::ValidationError)?;

        let inserted: ConversationModel = diesel::insert_into(conversations)
            .values(&new_conversation)
            .get_result(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(inserted.id)
    }

    async fn find_by_id(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let result = conversations
            .find(conversation_id)
            .first::<ConversationModel>(&mut conn)
            .optional()
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let conversation = Conversation::try_from(model)
                    .map_err(ConversationRepositoryError::ValidationError)?;
                Ok(Some(conversation))
            }
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        conversation: &Conversation,
    ) -> Result<(), ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewConversationModel::try_from(conversation)
            .map_err(ConversationRepositoryError::ValidationError)?;

        diesel::update(conversations.find(conversation.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
