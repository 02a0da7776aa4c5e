use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::{
    ChatMessage, ChatProviderError, ChatRequest, ProviderRegistry, SecretVault, TokenUsage,
    VectorIndex, VectorIndexError,
};
use crate::domain::entities::Conversation;
use crate::domain::repositories::{
    ChatbotRepository, ConversationRepository, CredentialRepository,
};
use crate::domain::value_objects::ProviderKind;

const TOP_K: usize = 4;
const MAX_COMPLETION_TOKENS: u32 = 1024;

#[derive(Debug)]
pub enum ChatError {
    ChatbotNotFound(Uuid),
    ConversationNotFound(Uuid),
    UnsupportedModel(String),
    MissingCredential(ProviderKind),
    CredentialLimitReached(ProviderKind),
    VaultError(String),
    RetrievalError(VectorIndexError),
    VendorError(ChatProviderError),
    RepositoryError(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::ChatbotNotFound(id) => write!(f, "Chatbot not found: {}", id),
            ChatError::ConversationNotFound(id) => write!(f, "Conversation not found: {}", id),
            ChatError::UnsupportedModel(model) => write!(f, "Unsupported model: {}", model),
            ChatError::MissingCredential(provider) => {
                write!(f, "No active {} credential for this workspace", provider)
            }
            ChatError::CredentialLimitReached(provider) => {
                write!(f, "The {} credential has reached its spend limit", provider)
            }
            ChatError::VaultError(msg) => write!(f, "Credential decryption failed: {}", msg),
            ChatError::RetrievalError(e) => write!(f, "Retrieval failed: {}", e),
            ChatError::VendorError(e) => write!(f, "{}", e),
            ChatError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub conversation_id: Uuid,
    pub sources: Vec<String>,
    pub usage: TokenUsage,
}

/// One retrieval-augmented chat turn.
///
/// Precondition failures (unroutable model, missing or exhausted credential)
/// are reported before any vendor traffic and leave the conversation record
/// untouched. A vendor failure after retrieval also leaves the conversation
/// untouched: only a successful turn is appended.
pub struct ChatService {
    chatbots: Arc<dyn ChatbotRepository>,
    credentials: Arc<dyn CredentialRepository>,
    conversations: Arc<dyn ConversationRepository>,
    index: Arc<dyn VectorIndex>,
    registry: Arc<ProviderRegistry>,
    vault: Arc<dyn SecretVault>,
}

impl ChatService {
    pub fn new(
        chatbots: Arc<dyn ChatbotRepository>,
        credentials: Arc<dyn CredentialRepository>,
        conversations: Arc<dyn ConversationRepository>,
        index: Arc<dyn VectorIndex>,
        registry: Arc<ProviderRegistry>,
        vault: Arc<dyn SecretVault>,
    ) -> Self {
        Self {
            chatbots,
            credentials,
            conversations,
            index,
            registry,
            vault,
        }
    }

    pub async fn send(
        &self,
        workspace_id: Uuid,
        chatbot_id: Uuid,
        conversation_id: Option<Uuid>,
        visitor_id: String,
        message: String,
    ) -> Result<ChatOutcome, ChatError> {
        let chatbot = self
            .chatbots
            .find_by_id(chatbot_id)
            .await
            .map_err(|e| ChatError::RepositoryError(e.to_string()))?
            .filter(|c| c.belongs_to(workspace_id) && !c.is_deleted())
            .ok_or(ChatError::ChatbotNotFound(chatbot_id))?;

        // Model routing and credential lookup are preconditions: both are
        // checked before any vendor call is attempted.
        let (provider_kind, provider) = self
            .registry
            .resolve(chatbot.model())
            .ok_or_else(|| ChatError::UnsupportedModel(chatbot.model().to_string()))?;

        let mut credential = self
            .credentials
            .find_active(workspace_id, provider_kind)
            .await
            .map_err(|e| ChatError::RepositoryError(e.to_string()))?
            .ok_or(ChatError::MissingCredential(provider_kind))?;

        if credential.limit_reached() {
            return Err(ChatError::CredentialLimitReached(provider_kind));
        }

        let api_key = self
            .vault
            .decrypt(credential.encrypted_key())
            .map_err(|e| ChatError::VaultError(e.to_string()))?;

        let mut conversation = match conversation_id {
            Some(id) => self
                .conversations
                .find_by_id(id)
                .await
                .map_err(|e| ChatError::RepositoryError(e.to_string()))?
                .filter(|c| c.chatbot_id() == chatbot_id)
                .ok_or(ChatError::ConversationNotFound(id))?,
            None => Conversation::new(chatbot_id, visitor_id),
        };

        let retrieved = self
            .index
            .query(chatbot.namespace(), &message, TOP_K)
            .await
            .map_err(ChatError::RetrievalError)?;

        let mut sources: Vec<String> = Vec::new();
        for chunk in &retrieved {
            if !sources.iter().any(|s| s == &chunk.source) {
                sources.push(chunk.source.clone());
            }
        }

        let system = assemble_system_prompt(chatbot.system_prompt(), &retrieved);

        let mut messages: Vec<ChatMessage> = conversation
            .messages()
            .iter()
            .map(|m| ChatMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            })
            .collect();
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: message.clone(),
        });

        let request = ChatRequest {
            model: chatbot.model().to_string(),
            api_key,
            system: Some(system),
            messages,
            temperature: chatbot.temperature(),
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let completion = provider.chat(&request).await.map_err(ChatError::VendorError)?;

        credential.record_usage(completion.usage.total_tokens);
        self.credentials
            .update(&credential)
            .await
            .map_err(|e| ChatError::RepositoryError(e.to_string()))?;

        conversation.append_turn(message, completion.content.clone(), sources.clone());
        if conversation_id.is_some() {
            self.conversations
                .update(&conversation)
                .await
                .map_err(|e| ChatError::RepositoryError(e.to_string()))?;
        } else {
            self.conversations
                .save(&conversation)
                .await
                .map_err(|e| ChatError::RepositoryError(e.to_string()))?;
        }

        tracing::info!(
            chatbot_id = %chatbot_id,
            conversation_id = %conversation.id(),
            total_tokens = completion.usage.total_tokens,
            "Chat turn completed"
        );

        Ok(ChatOutcome {
            reply: completion.content,
            conversation_id: conversation.id(),
            sources,
            usage: completion.usage,
        })
    }
}

/// System instructions first, then the retrieved excerpts as grounding
/// context. Conversation history and the new message follow as proper turns.
fn assemble_system_prompt(
    system_prompt: &str,
    retrieved: &[crate::application::ports::RetrievedChunk],
) -> String {
    let mut system = system_prompt.to_string();
    if !retrieved.is_empty() {
        system.push_str(
            "\n\nUse the following knowledge-base excerpts to answer. \
             If they do not contain the answer, say you do not know.\n",
        );
        for chunk in retrieved {
            system.push_str(&format!("\n[{} #{}]\n{}\n", chunk.source, chunk.ordinal, chunk.text));
        }
    }
    system
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Chatbot, Credential, MessageRole};
    use crate::domain::value_objects::TextChunk;
    use crate::test_support::{
        InMemoryChatbotRepository, InMemoryConversationRepository, InMemoryCredentialRepository,
        InMemoryVectorIndex, ScriptedChatProvider,
    };

    struct NullVault;

    impl SecretVault for NullVault {
        fn encrypt(&self, plaintext: &str) -> Result<String, crate::application::ports::VaultError> {
            Ok(format!("enc:{}", plaintext))
        }

        fn decrypt(&self, opaque: &str) -> Result<String, crate::application::ports::VaultError> {
            Ok(opaque.trim_start_matches("enc:").to_string())
        }
    }

    struct Fixture {
        chatbots: Arc<InMemoryChatbotRepository>,
        credentials: Arc<InMemoryCredentialRepository>,
        conversations: Arc<InMemoryConversationRepository>,
        index: Arc<InMemoryVectorIndex>,
        provider: Arc<ScriptedChatProvider>,
        service: ChatService,
    }

    fn fixture(reply: &str) -> Fixture {
        let chatbots = Arc::new(InMemoryChatbotRepository::default());
        let credentials = Arc::new(InMemoryCredentialRepository::default());
        let conversations = Arc::new(InMemoryConversationRepository::default());
        let index = Arc::new(InMemoryVectorIndex::default());
        let provider = Arc::new(ScriptedChatProvider::new(
            reply,
            TokenUsage {
                prompt_tokens: 50,
                completion_tokens: 25,
                total_tokens: 75,
            },
        ));

        let mut registry = ProviderRegistry::new();
        registry.register("gpt-", ProviderKind::OpenAi, provider.clone());

        let service = ChatService::new(
            chatbots.clone(),
            credentials.clone(),
            conversations.clone(),
            index.clone(),
            Arc::new(registry),
            Arc::new(NullVault),
        );

        Fixture {
            chatbots,
            credentials,
            conversations,
            index,
            provider,
            service,
        }
    }

    async fn seed_chatbot(fixture: &Fixture, workspace_id: Uuid, model: &str) -> Chatbot {
        let chatbot = Chatbot::new(
            workspace_id,
            "Support bot".to_string(),
            "You are a helpful support agent.".to_string(),
            model.to_string(),
            Some(0.3),
        );
        fixture.chatbots.save(&chatbot).await.unwrap();
        chatbot
    }

    async fn seed_credential(fixture: &Fixture, workspace_id: Uuid) -> Credential {
        let credential = Credential::new(
            workspace_id,
            ProviderKind::OpenAi,
            "enc:sk-test".to_string(),
            None,
        );
        fixture.credentials.save(&credential).await.unwrap();
        credential
    }

    #[tokio::test]
    async fn test_missing_credential_blocks_before_any_vendor_call() {
        let fixture = fixture("unused");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "gpt-4o-mini").await;

        let result = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                None,
                "visitor-1".to_string(),
                "Hello?".to_string(),
            )
            .await;

        assert!(matches!(
            result,
            Err(ChatError::MissingCredential(ProviderKind::OpenAi))
        ));
        assert_eq!(fixture.provider.call_count(), 0);
        assert_eq!(fixture.conversations.count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_model_blocks_before_credential_lookup() {
        let fixture = fixture("unused");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "mistral-large").await;
        seed_credential(&fixture, workspace_id).await;

        let result = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                None,
                "visitor-1".to_string(),
                "Hello?".to_string(),
            )
            .await;

        assert!(matches!(result, Err(ChatError::UnsupportedModel(_))));
        assert_eq!(fixture.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_spend_limit_blocks_the_call() {
        let fixture = fixture("unused");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "gpt-4o-mini").await;

        let mut credential = Credential::new(
            workspace_id,
            ProviderKind::OpenAi,
            "enc:sk-test".to_string(),
            Some(100),
        );
        credential.record_usage(100);
        fixture.credentials.save(&credential).await.unwrap();

        let result = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                None,
                "visitor-1".to_string(),
                "Hello?".to_string(),
            )
            .await;

        assert!(matches!(
            result,
            Err(ChatError::CredentialLimitReached(ProviderKind::OpenAi))
        ));
        assert_eq!(fixture.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_turn_appends_pair_and_records_usage() {
        let fixture = fixture("Our refund window is 30 days.");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "gpt-4o-mini").await;
        let credential = seed_credential(&fixture, workspace_id).await;

        fixture
            .index
            .upsert(
                chatbot.namespace(),
                &[TextChunk::new(
                    "policy.pdf",
                    0,
                    "Refunds are accepted within 30 days.".to_string(),
                )],
            )
            .await
            .unwrap();

        let outcome = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                None,
                "visitor-1".to_string(),
                "What is the refund window?".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.reply, "Our refund window is 30 days.");
        assert_eq!(outcome.sources, vec!["policy.pdf".to_string()]);
        assert_eq!(outcome.usage.total_tokens, 75);

        // The retrieved excerpt grounds the system prompt.
        let request = &fixture.provider.recorded_requests()[0];
        assert!(request.system.as_ref().unwrap().contains("Refunds are accepted"));
        assert!(
            request
                .system
                .as_ref()
                .unwrap()
                .starts_with("You are a helpful support agent.")
        );

        let conversation = fixture
            .conversations
            .find_by_id(outcome.conversation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.messages().len(), 2);

        let updated = fixture
            .credentials
            .find_by_id(credential.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.tokens_used(), 75);
    }

    #[tokio::test]
    async fn test_second_turn_carries_history_and_grows_by_two() {
        let fixture = fixture("Store credit only.");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "gpt-4o-mini").await;
        seed_credential(&fixture, workspace_id).await;

        let first = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                None,
                "visitor-1".to_string(),
                "What about refunds?".to_string(),
            )
            .await
            .unwrap();

        let second = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                Some(first.conversation_id),
                "visitor-1".to_string(),
                "And after 30 days?".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(second.conversation_id, first.conversation_id);

        // The second prompt includes the first turn pair before the new
        // message.
        let messages = fixture.provider.recorded_messages(1);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "What about refunds?");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[1].content, "Store credit only.");
        assert_eq!(messages[2].role, "user");
        assert_eq!(messages[2].content, "And after 30 days?");

        let conversation = fixture
            .conversations
            .find_by_id(first.conversation_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(conversation.messages().len(), 4);
        assert_eq!(conversation.messages()[3].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_supplied_conversation_must_belong_to_the_chatbot() {
        let fixture = fixture("unused");
        let workspace_id = Uuid::new_v4();
        let chatbot = seed_chatbot(&fixture, workspace_id, "gpt-4o-mini").await;
        seed_credential(&fixture, workspace_id).await;

        let foreign = Conversation::new(Uuid::new_v4(), "visitor-9".to_string());
        fixture.conversations.save(&foreign).await.unwrap();

        let result = fixture
            .service
            .send(
                workspace_id,
                chatbot.id(),
                Some(foreign.id()),
                "visitor-1".to_string(),
                "Hello?".to_string(),
            )
            .await;

        assert!(matches!(result, Err(ChatError::ConversationNotFound(_))));
        assert_eq!(fixture.provider.call_count(), 0);
    }
}
