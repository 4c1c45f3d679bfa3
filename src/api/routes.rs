use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use uuid::Uuid;
use validator::Validate;

use crate::{api::dto::*, services::chat_service::ChatService};

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, Response> {
    // Field-level 400 payload; the service is never reached on bad input.
    if let Err(errors) = req.validate() {
        return Err((StatusCode::BAD_REQUEST, Json(errors)).into_response());
    }

    let conversation_id = Uuid::parse_str(&req.conversation_id)
        .map_err(|_| StatusCode::BAD_REQUEST.into_response())?;

    match state
        .chat_service
        .send_message(req.prompt.trim(), conversation_id)
        .await
    {
        Ok(message) => Ok(Json(ChatResponse { message })),
        Err(e) => {
            tracing::error!(%conversation_id, "Error in chat handler: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "An error occurred while processing your request.".to_string(),
                }),
            )
                .into_response())
        }
    }
}

pub async fn root() -> &'static str {
    "Hello from the server!"
}

pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello, API!".to_string(),
    })
}

pub async fn health() -> &'static str {
    "OK"
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .nest_service("/ui", ServeDir::new("web"))
        .with_state(state)
}
