//! In-memory fakes of the ports and repositories, shared by the pipeline
//! scenario tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{
    BlobStorage, BlobStorageError, ChatCompletion, ChatMessage, ChatProvider, ChatProviderError,
    ChatRequest, RetrievedChunk, StoredBlob, TokenUsage, VectorIndex, VectorIndexError,
};
use crate::domain::entities::{Chatbot, Conversation, Credential, Document, IngestionJob};
use crate::domain::repositories::{
    ChatbotRepository, ChatbotRepositoryError, ConversationRepository,
    ConversationRepositoryError, CredentialRepository, CredentialRepositoryError,
    DocumentRepository, DocumentRepositoryError, IngestionJobRepository,
    IngestionJobRepositoryError,
};
use crate::domain::value_objects::{Namespace, ProviderKind, TextChunk};

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<Uuid, Document>>,
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<Uuid, DocumentRepositoryError> {
        self.documents
            .lock()
            .unwrap()
            .insert(document.id(), document.clone());
        Ok(document.id())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.documents.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_chatbot(
        &self,
        chatbot_id: Uuid,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.chatbot_id() == chatbot_id && !d.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        self.documents
            .lock()
            .unwrap()
            .insert(document.id(), document.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChatbotRepository {
    chatbots: Mutex<HashMap<Uuid, Chatbot>>,
}

#[async_trait]
impl ChatbotRepository for InMemoryChatbotRepository {
    async fn save(&self, chatbot: &Chatbot) -> Result<Uuid, ChatbotRepositoryError> {
        self.chatbots
            .lock()
            .unwrap()
            .insert(chatbot.id(), chatbot.clone());
        Ok(chatbot.id())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>, ChatbotRepositoryError> {
        Ok(self.chatbots.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<Chatbot>, ChatbotRepositoryError> {
        Ok(self
            .chatbots
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.workspace_id() == workspace_id && !c.is_deleted())
            .cloned()
            .collect())
    }

    async fn update(&self, chatbot: &Chatbot) -> Result<(), ChatbotRepositoryError> {
        self.chatbots
            .lock()
            .unwrap()
            .insert(chatbot.id(), chatbot.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryConversationRepository {
    conversations: Mutex<HashMap<Uuid, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn count(&self) -> usize {
        self.conversations.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(
        &self,
        conversation: &Conversation,
    ) -> Result<Uuid, ConversationRepositoryError> {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id(), conversation.clone());
        Ok(conversation.id())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        Ok(self.conversations.lock().unwrap().get(&id).cloned())
    }

    async fn update(
        &self,
        conversation: &Conversation,
    ) -> Result<(), ConversationRepositoryError> {
        self.conversations
            .lock()
            .unwrap()
            .insert(conversation.id(), conversation.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: Mutex<HashMap<Uuid, Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn save(&self, credential: &Credential) -> Result<Uuid, CredentialRepositoryError> {
        self.credentials
            .lock()
            .unwrap()
            .insert(credential.id(), credential.clone());
        Ok(credential.id())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(self.credentials.lock().unwrap().get(&id).cloned())
    }

    async fn find_active(
        &self,
        workspace_id: Uuid,
        provider: ProviderKind,
    ) -> Result<Option<Credential>, CredentialRepositoryError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .values()
            .find(|c| {
                c.workspace_id() == workspace_id && c.provider() == provider && c.is_active()
            })
            .cloned())
    }

    async fn find_by_workspace(
        &self,
        workspace_id: Uuid,
    ) -> Result<Vec<Credential>, CredentialRepositoryError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.workspace_id() == workspace_id)
            .cloned()
            .collect())
    }

    async fn update(&self, credential: &Credential) -> Result<(), CredentialRepositoryError> {
        self.credentials
            .lock()
            .unwrap()
            .insert(credential.id(), credential.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryIngestionJobRepository {
    jobs: Mutex<HashMap<Uuid, IngestionJob>>,
}

#[async_trait]
impl IngestionJobRepository for InMemoryIngestionJobRepository {
    async fn save(&self, job: &IngestionJob) -> Result<Uuid, IngestionJobRepositoryError> {
        self.jobs.lock().unwrap().insert(job.id(), job.clone());
        Ok(job.id())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<IngestionJob>, IngestionJobRepositoryError> {
        Ok(self.jobs.lock().unwrap().get(&id).cloned())
    }

    async fn find_unfinished(&self) -> Result<Vec<IngestionJob>, IngestionJobRepositoryError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .values()
            .filter(|j| !j.is_finished())
            .cloned()
            .collect())
    }

    async fn update(&self, job: &IngestionJob) -> Result<(), IngestionJobRepositoryError> {
        self.jobs.lock().unwrap().insert(job.id(), job.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBlobStorage {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl BlobStorage for InMemoryBlobStorage {
    async fn put(&self, data: &[u8]) -> Result<StoredBlob, BlobStorageError> {
        let key = Uuid::new_v4().to_string();
        self.blobs.lock().unwrap().insert(key.clone(), data.to_vec());
        Ok(StoredBlob {
            key,
            size: data.len() as u64,
        })
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobStorageError> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| BlobStorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobStorageError> {
        Ok(self.blobs.lock().unwrap().remove(key).is_some())
    }
}

/// Vector index fake: stores chunks per namespace, answers queries with the
/// stored chunks in insertion order, and can be armed to fail the next
/// upsert.
#[derive(Default)]
pub struct InMemoryVectorIndex {
    store: Mutex<HashMap<String, Vec<TextChunk>>>,
    fail_next_upsert: AtomicBool,
}

impl InMemoryVectorIndex {
    pub fn fail_next_upsert(&self) {
        self.fail_next_upsert.store(true, Ordering::SeqCst);
    }

    pub fn chunk_count(&self, namespace: &Namespace) -> usize {
        self.store
            .lock()
            .unwrap()
            .get(namespace.as_str())
            .map(|chunks| chunks.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(
        &self,
        namespace: &Namespace,
        chunks: &[TextChunk],
    ) -> Result<usize, VectorIndexError> {
        if self.fail_next_upsert.swap(false, Ordering::SeqCst) {
            return Err(VectorIndexError::HttpError(
                "vector store unavailable".to_string(),
            ));
        }
        let mut store = self.store.lock().unwrap();
        store
            .entry(namespace.as_str().to_string())
            .or_default()
            .extend_from_slice(chunks);
        Ok(chunks.len())
    }

    async fn query(
        &self,
        namespace: &Namespace,
        _text: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, VectorIndexError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .get(namespace.as_str())
            .map(|chunks| {
                chunks
                    .iter()
                    .take(top_k)
                    .map(|chunk| RetrievedChunk {
                        source: chunk.source().to_string(),
                        ordinal: chunk.ordinal(),
                        text: chunk.text().to_string(),
                        score: 0.9,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_namespace(&self, namespace: &Namespace) -> Result<(), VectorIndexError> {
        self.store.lock().unwrap().remove(namespace.as_str());
        Ok(())
    }
}

/// Chat provider fake: replies with a fixed completion and records every
/// request it receives.
pub struct ScriptedChatProvider {
    reply: String,
    usage: TokenUsage,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl ScriptedChatProvider {
    pub fn new(reply: &str, usage: TokenUsage) -> Self {
        Self {
            reply: reply.to_string(),
            usage,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn recorded_messages(&self, call: usize) -> Vec<ChatMessage> {
        self.requests.lock().unwrap()[call].messages.clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedChatProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(ChatCompletion {
            content: self.reply.clone(),
            usage: self.usage,
        })
    }
}
