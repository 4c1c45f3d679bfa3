use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

// ==================== REQUEST DTOs ====================

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct ChatRequest {
    #[validate(custom(function = validate_prompt))]
    pub prompt: String,

    /// UUID scoping a sequence of prompt/response turns.
    #[serde(rename = "conversationId")]
    #[validate(custom(function = validate_conversation_id))]
    pub conversation_id: String,
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("min_length").with_message("Prompt is required.".into()));
    }
    if trimmed.chars().count() > 1000 {
        return Err(ValidationError::new("max_length")
            .with_message("Prompt is too long (max 1000 characters).".into()));
    }
    Ok(())
}

fn validate_conversation_id(id: &str) -> Result<(), ValidationError> {
    if uuid::Uuid::parse_str(id).is_err() {
        return Err(
            ValidationError::new("uuid").with_message("conversationId must be a UUID.".into())
        );
    }
    Ok(())
}

// ==================== RESPONSE DTOs ====================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
