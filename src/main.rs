use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatrelay::{
    api::routes,
    config::Config,
    services::{chat_service::ChatService, gemini::GeminiClient},
    storage::conversation_store::InMemoryConversationStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load config; fails fast when GEMINI_API_KEY is absent
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!("chatrelay={}", config.log_level))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Wire provider -> store -> service
    let provider = Arc::new(GeminiClient::from_config(&config));
    let store = Arc::new(InMemoryConversationStore::new(provider));
    let chat_service = Arc::new(ChatService::new(store));

    let state = routes::AppState { chat_service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Gemini model: {}", config.gemini_model);
    tracing::info!("Chat UI: http://{}/ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
