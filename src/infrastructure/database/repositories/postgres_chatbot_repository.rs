use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Chatbot;
use crate::domain::repositories::{ChatbotRepository, ChatbotRepositoryError};
use crate::infrastructure::database::connection::{DbPool, get_connection_from_pool};
use crate::infrastructure::database::models::{ChatbotModel, NewChatbotModel};
use crate::infrastructure::database::schema::chatbots::dsl::*;

pub struct PostgresChatbotRepository {
    pool: DbPool,
}

impl PostgresChatbotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatbotRepository for PostgresChatbotRepository {
    async fn save(&self, chatbot: &Chatbot) -> Result<Uuid, ChatbotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        let new_chatbot = NewChatbotModel::from(chatbot);

        let inserted: ChatbotModel = diesel::insert_into(chatbots)
            .values(&new_chatbot)
            .get_result(&mut conn)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        Ok(inserted.id)
    }

    async fn find_by_id(
        &self,
        chatbot_id: Uuid,
    ) -> Result<Option<Chatbot>, ChatbotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        let result = chatbots
            .find(chatbot_id)
            .first::<ChatbotModel>(&mut conn)
            .optional()
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(record) => {
                let chatbot =
                    Chatbot::try_from(record).map_err(ChatbotRepositoryError::ValidationError)?;
                Ok(Some(chatbot))
            }
            None => Ok(None),
        }
    }

    async fn find_by_workspace(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<Chatbot>, ChatbotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        let models = chatbots
            .filter(workspace_id.eq(owner_id))
            .filter(deleted_at.is_null())
            .order(created_at.desc())
            .load::<ChatbotModel>(&mut conn)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        let mut result = Vec::with_capacity(models.len());
        for record in models {
            result
                .push(Chatbot::try_from(record).map_err(ChatbotRepositoryError::ValidationError)?);
        }
        Ok(result)
    }

    async fn update(&self, chatbot: &Chatbot) -> Result<(), ChatbotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        let changes = NewChatbotModel::from(chatbot);

        diesel::update(chatbots.find(chatbot.id()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| ChatbotRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
