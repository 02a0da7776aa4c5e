use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-chatbot partition key in the external vector store.
///
/// This is the only multi-tenant isolation mechanism on the retrieval path:
/// every chunk of a chatbot lives under its namespace and nowhere else. The
/// value is derived once at chatbot creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Derive a fresh namespace for a chatbot: the owning workspace id plus a
    /// random suffix, so two chatbots in one workspace never collide.
    pub fn derive(workspace_id: Uuid) -> Self {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
        Namespace(format!("{}-{}", workspace_id.as_simple(), suffix))
    }

    /// Rebuild a namespace from its persisted value.
    pub fn from_value(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            return Err("Namespace cannot be empty".to_string());
        }
        Ok(Namespace(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_scoped_to_workspace() {
        let workspace_id = Uuid::new_v4();
        let namespace = Namespace::derive(workspace_id);

        assert!(
            namespace
                .as_str()
                .starts_with(&workspace_id.as_simple().to_string())
        );
    }

    #[test]
    fn test_derive_is_unique_per_call() {
        let workspace_id = Uuid::new_v4();
        let first = Namespace::derive(workspace_id);
        let second = Namespace::derive(workspace_id);

        assert_ne!(first, second);
    }

    #[test]
    fn test_from_value_rejects_empty() {
        assert!(Namespace::from_value(String::new()).is_err());
        assert!(Namespace::from_value("  ".to_string()).is_err());
        assert!(Namespace::from_value("ws-abc".to_string()).is_ok());
    }
}
