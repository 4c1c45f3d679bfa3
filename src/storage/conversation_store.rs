use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::provider::{ChatProvider, ChatSession};

// ============================================
// TRAIT DEFINITION - with Send + Sync bounds
// ============================================
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Look up the session for a conversation, if one exists.
    async fn get(&self, id: Uuid) -> Option<Arc<dyn ChatSession>>;

    /// Construct a fresh session via the provider, replacing any existing
    /// entry for `id`.
    async fn create(&self, id: Uuid) -> Arc<dyn ChatSession>;

    /// Return the existing session or create one. Atomic: concurrent callers
    /// for the same new `id` all receive the same handle.
    async fn get_or_create(&self, id: Uuid) -> Arc<dyn ChatSession>;

    /// Remove the entry, reporting whether one existed.
    async fn delete(&self, id: Uuid) -> bool;

    async fn has(&self, id: Uuid) -> bool;
}

// ============================================
// IN-MEMORY IMPLEMENTATION
// ============================================

/// Keyed session registry with lazy creation. No eviction, no size bound, no
/// TTL; entries live for the process lifetime unless deleted.
pub struct InMemoryConversationStore {
    provider: Arc<dyn ChatProvider>,
    sessions: RwLock<HashMap<Uuid, Arc<dyn ChatSession>>>,
}

impl InMemoryConversationStore {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: Uuid) -> Option<Arc<dyn ChatSession>> {
        self.sessions.read().await.get(&id).cloned()
    }

    async fn create(&self, id: Uuid) -> Arc<dyn ChatSession> {
        let session = self.provider.create_session();
        self.sessions.write().await.insert(id, session.clone());
        tracing::debug!(%id, "created conversation session");
        session
    }

    async fn get_or_create(&self, id: Uuid) -> Arc<dyn ChatSession> {
        // Check and insert under one write lock; session construction does no
        // I/O, so no await point sits inside the critical section.
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(session) => session.clone(),
            None => {
                let session = self.provider.create_session();
                sessions.insert(id, session.clone());
                tracing::debug!(%id, "created conversation session");
                session
            }
        }
    }

    async fn delete(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    async fn has(&self, id: Uuid) -> bool {
        self.sessions.read().await.contains_key(&id)
    }
}
