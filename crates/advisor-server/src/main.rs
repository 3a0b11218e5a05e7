//! finance-advisor HTTP Server
//!
//! Axum-based server exposing the advisory REST API: financial profiles,
//! one-shot investment advice, and advisor chat. Authentication sits in
//! front of this service; callers supply their identity as `user_id`.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor_core::LlmProvider;
use advisor_runtime::OllamaClient;
use finance_advisor::{AdvisorEngine, MemoryAdviceStore, MemoryChatStore, MemoryProfileStore};

use crate::handlers::{
    advice_history, chat_handler, chat_history, create_profile, generate_advice, get_advice,
    get_profile, health_check, update_profile,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize LLM provider
    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaClient::from_env()?);
    let info = provider.describe();

    // Probe the model endpoint; without it every request serves fallback advice
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to {} at {}", info.name, info.endpoint);
            tracing::info!("  Model: {}", info.model);
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Model endpoint not reachable - serving fallback advice");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Build the advisory engine on in-memory stores
    let engine = AdvisorEngine::new(
        provider.clone(),
        Arc::new(MemoryProfileStore::new()),
        Arc::new(MemoryAdviceStore::new()),
        Arc::new(MemoryChatStore::new()),
    );

    let state = AppState {
        engine: Arc::new(engine),
        provider,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health
        .route("/health", get(health_check))
        // Profile API
        .route(
            "/api/profile",
            post(create_profile).put(update_profile).get(get_profile),
        )
        // Advice API
        .route("/api/advice", post(generate_advice))
        .route("/api/advice/history", get(advice_history))
        .route("/api/advice/{id}", get(get_advice))
        // Chat API
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/history", get(chat_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 finance-advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health              - Health check");
    tracing::info!("  POST /api/profile         - Create profile (generates first advice)");
    tracing::info!("  PUT  /api/profile         - Update profile");
    tracing::info!("  GET  /api/profile         - Fetch profile");
    tracing::info!("  POST /api/advice          - Generate fresh advice");
    tracing::info!("  GET  /api/advice/history  - Advice history (newest first)");
    tracing::info!("  GET  /api/advice/{{id}}     - One advice record");
    tracing::info!("  POST /api/chat            - Send chat message");
    tracing::info!("  GET  /api/chat/history    - Chat transcript");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
