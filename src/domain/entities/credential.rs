use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ProviderKind;

/// An encrypted third-party API key scoped to one workspace and provider.
///
/// The key is stored only in its vault-encrypted form and decrypted at the
/// moment of an outbound vendor call. `tokens_used` advances by the
/// vendor-reported total after each successful call; once it reaches the
/// optional spend ceiling the credential stops being usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    id: Uuid,
    workspace_id: Uuid,
    provider: ProviderKind,
    encrypted_key: String,
    active: bool,
    spend_limit_tokens: Option<i64>,
    tokens_used: i64,
    created_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        workspace_id: Uuid,
        provider: ProviderKind,
        encrypted_key: String,
        spend_limit_tokens: Option<i64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            provider,
            encrypted_key,
            active: true,
            spend_limit_tokens,
            tokens_used: 0,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a credential from persisted columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        workspace_id: Uuid,
        provider: ProviderKind,
        encrypted_key: String,
        active: bool,
        spend_limit_tokens: Option<i64>,
        tokens_used: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            workspace_id,
            provider,
            encrypted_key,
            active,
            spend_limit_tokens,
            tokens_used,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn workspace_id(&self) -> Uuid {
        self.workspace_id
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn encrypted_key(&self) -> &str {
        &self.encrypted_key
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn spend_limit_tokens(&self) -> Option<i64> {
        self.spend_limit_tokens
    }

    pub fn tokens_used(&self) -> i64 {
        self.tokens_used
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn limit_reached(&self) -> bool {
        self.spend_limit_tokens
            .map(|limit| self.tokens_used >= limit)
            .unwrap_or(false)
    }

    pub fn is_usable(&self) -> bool {
        self.active && !self.limit_reached()
    }

    pub fn record_usage(&mut self, total_tokens: i64) {
        self.tokens_used = self.tokens_used.saturating_add(total_tokens.max(0));
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credential_is_usable() {
        let credential = Credential::new(
            Uuid::new_v4(),
            ProviderKind::OpenAi,
            "opaque".to_string(),
            None,
        );

        assert!(credential.is_active());
        assert!(credential.is_usable());
        assert_eq!(credential.tokens_used(), 0);
    }

    #[test]
    fn test_usage_accumulates() {
        let mut credential = Credential::new(
            Uuid::new_v4(),
            ProviderKind::Anthropic,
            "opaque".to_string(),
            None,
        );

        credential.record_usage(120);
        credential.record_usage(80);

        assert_eq!(credential.tokens_used(), 200);
    }

    #[test]
    fn test_spend_ceiling_stops_usage() {
        let mut credential = Credential::new(
            Uuid::new_v4(),
            ProviderKind::Google,
            "opaque".to_string(),
            Some(100),
        );

        assert!(credential.is_usable());
        credential.record_usage(100);

        assert!(credential.limit_reached());
        assert!(!credential.is_usable());
        // Still active: the ceiling, not the flag, is what blocks it.
        assert!(credential.is_active());
    }

    #[test]
    fn test_deactivated_credential_is_not_usable() {
        let mut credential = Credential::new(
            Uuid::new_v4(),
            ProviderKind::OpenAi,
            "opaque".to_string(),
            None,
        );

        credential.deactivate();
        assert!(!credential.is_usable());
    }

    #[test]
    fn test_negative_usage_is_ignored() {
        let mut credential = Credential::new(
            Uuid::new_v4(),
            ProviderKind::OpenAi,
            "opaque".to_string(),
            None,
        );

        credential.record_usage(-50);
        assert_eq!(credential.tokens_used(), 0);
    }
}
