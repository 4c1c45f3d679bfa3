//! Chatrelay - Gemini chat proxy

pub mod api;
pub mod config;
pub mod services;
pub mod storage;

// Re-export main types for convenience
pub use crate::api::dto::*;
pub use crate::api::routes::{create_router, AppState};
pub use crate::config::Config;
pub use crate::services::chat_service::ChatService;
pub use crate::services::gemini::GeminiClient;
pub use crate::services::provider::{ChatProvider, ChatSession, ProviderError};
pub use crate::storage::conversation_store::{ConversationStore, InMemoryConversationStore};
