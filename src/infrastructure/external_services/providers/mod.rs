pub mod anthropic;
pub mod google;
pub mod openai;

pub use anthropic::AnthropicChatProvider;
pub use google::GoogleChatProvider;
pub use openai::OpenAiChatProvider;

use std::sync::Arc;

use crate::application::ports::{ChatProviderError, ProviderRegistry};
use crate::domain::value_objects::ProviderKind;

/// Shared status-code classification for the vendor adapters: rate limiting
/// and quota exhaustion get their own categories so the user-facing message
/// can say something more useful than "upstream error".
pub(crate) fn classify_status(status: u16, message: String) -> ChatProviderError {
    match status {
        429 => ChatProviderError::RateLimited(message),
        402 => ChatProviderError::QuotaExhausted(message),
        _ if message.contains("insufficient_quota") => {
            ChatProviderError::QuotaExhausted(message)
        }
        _ => ChatProviderError::Upstream { status, message },
    }
}

/// The stock routing table: `gemini-` to Google, `claude-` to Anthropic, and
/// both OpenAI naming families (`gpt-*` and the `o`-series) to the
/// OpenAI-compatible adapter.
pub fn default_registry(timeout_secs: u64) -> Result<ProviderRegistry, reqwest::Error> {
    let openai: Arc<OpenAiChatProvider> = Arc::new(OpenAiChatProvider::new(timeout_secs)?);
    let anthropic = Arc::new(AnthropicChatProvider::new(timeout_secs)?);
    let google = Arc::new(GoogleChatProvider::new(timeout_secs)?);

    let mut registry = ProviderRegistry::new();
    registry.register("gpt-", ProviderKind::OpenAi, openai.clone());
    registry.register("o1", ProviderKind::OpenAi, openai.clone());
    registry.register("o3", ProviderKind::OpenAi, openai.clone());
    registry.register("o4", ProviderKind::OpenAi, openai);
    registry.register("claude-", ProviderKind::Anthropic, anthropic);
    registry.register("gemini-", ProviderKind::Google, google);

    Ok(registry)
}
