use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A single conversation with the provider. The handle owns its turn history;
/// callers only push prompts through it and read back the reply text.
#[async_trait]
pub trait ChatSession: Send + Sync {
    async fn send(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Factory for conversation sessions. Constructing a session is local-only;
/// the network is touched on the first `send`.
pub trait ChatProvider: Send + Sync {
    fn create_session(&self) -> Arc<dyn ChatSession>;
}
