use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::value_objects::ProviderKind;

#[derive(Debug)]
pub enum ChatProviderError {
    RateLimited(String),
    QuotaExhausted(String),
    Upstream { status: u16, message: String },
    HttpError(String),
    MalformedResponse(String),
}

impl std::fmt::Display for ChatProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatProviderError::RateLimited(msg) => write!(f, "Rate limit exceeded: {}", msg),
            ChatProviderError::QuotaExhausted(msg) => write!(f, "Quota exhausted: {}", msg),
            ChatProviderError::Upstream { status, message } => {
                write!(f, "Provider error ({}): {}", status, message)
            }
            ChatProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ChatProviderError::MalformedResponse(msg) => {
                write!(f, "Malformed provider response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChatProviderError {}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// One normalized chat-completion request, vendor-agnostic. The system text
/// travels separately because vendors disagree on where it belongs.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub api_key: String,
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// The common shape every vendor adapter normalizes into. Token counts are
/// vendor-reported, never computed locally.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: TokenUsage,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatProviderError>;
}

/// Maps model-name prefixes to vendor adapters. Resolution is a pure
/// function of the model name: longest registered prefix wins. Adding a
/// vendor is a registration, not a new branch in a conditional chain.
pub struct ProviderRegistry {
    routes: Vec<(String, ProviderKind, Arc<dyn ChatProvider>)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register(
        &mut self,
        prefix: &str,
        kind: ProviderKind,
        provider: Arc<dyn ChatProvider>,
    ) {
        self.routes.push((prefix.to_string(), kind, provider));
    }

    pub fn resolve(&self, model: &str) -> Option<(ProviderKind, Arc<dyn ChatProvider>)> {
        self.routes
            .iter()
            .filter(|(prefix, _, _)| model.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _, _)| prefix.len())
            .map(|(_, kind, provider)| (*kind, Arc::clone(provider)))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullProvider;

    #[async_trait]
    impl ChatProvider for NullProvider {
        async fn chat(
            &self,
            _request: &ChatRequest,
        ) -> Result<ChatCompletion, ChatProviderError> {
            Ok(ChatCompletion {
                content: String::new(),
                usage: TokenUsage::default(),
            })
        }
    }

    fn registry() -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        registry.register("gpt-", ProviderKind::OpenAi, Arc::new(NullProvider));
        registry.register("claude-", ProviderKind::Anthropic, Arc::new(NullProvider));
        registry.register("gemini-", ProviderKind::Google, Arc::new(NullProvider));
        registry
    }

    #[test]
    fn test_resolution_is_by_prefix() {
        let registry = registry();

        assert_eq!(
            registry.resolve("gpt-4o-mini").map(|(kind, _)| kind),
            Some(ProviderKind::OpenAi)
        );
        assert_eq!(
            registry.resolve("claude-sonnet-4-20250514").map(|(kind, _)| kind),
            Some(ProviderKind::Anthropic)
        );
        assert_eq!(
            registry.resolve("gemini-2.0-flash").map(|(kind, _)| kind),
            Some(ProviderKind::Google)
        );
    }

    #[test]
    fn test_unrecognized_prefix_resolves_to_none() {
        assert!(registry().resolve("mistral-large").is_none());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let mut registry = registry();
        registry.register("gpt-4o-audio", ProviderKind::Custom, Arc::new(NullProvider));

        assert_eq!(
            registry.resolve("gpt-4o-audio-preview").map(|(kind, _)| kind),
            Some(ProviderKind::Custom)
        );
        assert_eq!(
            registry.resolve("gpt-4o").map(|(kind, _)| kind),
            Some(ProviderKind::OpenAi)
        );
    }
}
