use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::services::provider::{ChatProvider, ChatSession, ProviderError};

/// HTTP client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )
    }

    /// Extract a message from Gemini's JSON error format, falling back to the
    /// raw body.
    fn api_error(status: u16, body: &str) -> ProviderError {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(msg) = parsed["error"]["message"].as_str() {
                return ProviderError::Api {
                    status,
                    message: msg.to_string(),
                };
            }
        }
        ProviderError::Api {
            status,
            message: body.to_string(),
        }
    }

    async fn generate(&self, contents: Vec<Content>) -> Result<String, ProviderError> {
        let request = GenerateContentRequest { contents };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }

        let body: GenerateContentResponse = response.json().await?;

        let candidate = body
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no candidates returned".to_string()))?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

impl ChatProvider for GeminiClient {
    fn create_session(&self) -> Arc<dyn ChatSession> {
        Arc::new(GeminiSession {
            client: self.clone(),
            history: Mutex::new(Vec::new()),
        })
    }
}

/// One Gemini conversation. Prior turns are replayed on every request since
/// the REST API is stateless; history is committed only after a successful
/// exchange, so a failed send leaves it untouched.
pub struct GeminiSession {
    client: GeminiClient,
    history: Mutex<Vec<Content>>,
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send(&self, prompt: &str) -> Result<String, ProviderError> {
        let user_turn = Content::user(prompt);

        let contents = {
            let history = self.history.lock().await;
            let mut contents = history.clone();
            contents.push(user_turn.clone());
            contents
        };

        let reply = self.client.generate(contents).await?;

        let mut history = self.history.lock().await;
        history.push(user_turn);
        history.push(Content::model(&reply));

        Ok(reply)
    }
}

// Request/Response Models
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}
