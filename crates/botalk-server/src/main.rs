//! Botalk HTTP Server
//!
//! Axum-based server for the marketing site: serves the static assets and
//! the JSON API behind the embedded demo assistant.

mod config;
mod handlers;
mod state;

use std::path::Path;

use axum::{routing::{get, post}, Router};
use botalk_runtime::GeminiConfig;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::handlers::{chat_handler, demo_conversation, health_check, knowledge};
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

    let config = ServerConfig::from_env()?;
    let facts = config.load_facts()?;
    tracing::info!(
        company = %facts.company.name,
        products = facts.products.len(),
        plans = facts.pricing_plans.len(),
        faq = facts.faq_entries.len(),
        "Fact base ready"
    );

    let gemini = GeminiConfig::from_env()?;
    let orchestrator = config.build_orchestrator(facts.clone(), gemini)?;
    tracing::info!(mode = ?orchestrator.mode(), "Demo assistant configured");

    let state = AppState::new(facts, orchestrator);
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("botalk-server running on http://{}", config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  POST /api/chat               - Ask the demo assistant");
    tracing::info!("  GET  /api/knowledge          - Company fact base");
    tracing::info!("  GET  /api/demo/conversation  - Widget opening script");
    tracing::info!("  GET  /*                      - Static site ({})", config.static_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/knowledge", get(knowledge))
        .route("/api/demo/conversation", get(demo_conversation))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
