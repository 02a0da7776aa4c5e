use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Namespace;

/// A configured chatbot owned by one workspace. The vector namespace is
/// derived once at creation and is the partition all of the bot's document
/// chunks are indexed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chatbot {
    id: Uuid,
    workspace_id: Uuid,
    name: String,
    system_prompt: String,
    model: String,
    temperature: Option<f32>,
    namespace: Namespace,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl Chatbot {
    pub fn new(
        workspace_id: Uuid,
        name: String,
        system_prompt: String,
        model: String,
        temperature: Option<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            name,
            system_prompt,
            model,
            temperature,
            namespace: Namespace::derive(workspace_id),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Rebuild a chatbot from persisted columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        workspace_id: Uuid,
        name: String,
        system_prompt: String,
        model: String,
        temperature: Option<f32>,
        namespace: Namespace,
        created_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            workspace_id,
            name,
            system_prompt,
            model,
            temperature,
            namespace,
            created_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn workspace_id(&self) -> Uuid {
        self.workspace_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn belongs_to(&self, workspace_id: Uuid) -> bool {
        self.workspace_id == workspace_id
    }

    pub fn soft_delete(&mut self) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_derived_from_workspace() {
        let workspace_id = Uuid::new_v4();
        let chatbot = Chatbot::new(
            workspace_id,
            "Support bot".to_string(),
            "You are a helpful support agent.".to_string(),
            "gpt-4o-mini".to_string(),
            Some(0.2),
        );

        assert!(chatbot.belongs_to(workspace_id));
        assert!(
            chatbot
                .namespace()
                .as_str()
                .starts_with(&workspace_id.as_simple().to_string())
        );
    }

    #[test]
    fn test_two_bots_in_one_workspace_get_distinct_namespaces() {
        let workspace_id = Uuid::new_v4();
        let first = Chatbot::new(
            workspace_id,
            "A".to_string(),
            "prompt".to_string(),
            "gpt-4o".to_string(),
            None,
        );
        let second = Chatbot::new(
            workspace_id,
            "B".to_string(),
            "prompt".to_string(),
            "gpt-4o".to_string(),
            None,
        );

        assert_ne!(first.namespace(), second.namespace());
    }
}
