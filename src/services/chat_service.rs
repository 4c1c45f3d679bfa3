use std::sync::Arc;
use uuid::Uuid;

use crate::services::provider::ProviderError;
use crate::storage::conversation_store::ConversationStore;

/// Mediates between the HTTP layer and the provider: resolves the session for
/// a conversation and forwards the prompt. Holds no state of its own beyond
/// the injected store.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
}

impl ChatService {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Forward `prompt` on the conversation's session, creating the session
    /// on first use. Provider failures propagate unchanged; no retry, no
    /// timeout.
    pub async fn send_message(
        &self,
        prompt: &str,
        conversation_id: Uuid,
    ) -> Result<String, ProviderError> {
        let session = self.store.get_or_create(conversation_id).await;

        tracing::debug!(%conversation_id, "forwarding prompt to provider");
        session.send(prompt).await
    }
}
