pub mod chat_service;
pub mod gemini;
pub mod provider;

// Re-export for convenience
pub use chat_service::ChatService;
pub use gemini::GeminiClient;
pub use provider::{ChatProvider, ChatSession, ProviderError};
