//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use botalk_core::{
    demo::{preset_conversation, DemoLine},
    FactBase, ReplySource, ResponseMode,
};

use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mode: String,
    pub remote_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub source: ReplySource,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = state.orchestrator.mode();

    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        mode: mode.name().into(),
        remote_configured: matches!(mode, ResponseMode::Remote(_)),
    })
}

/// Demo widget chat endpoint
///
/// Remote failures never surface here: the orchestrator falls back to the
/// fact base, so every well-formed message gets a 200.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    if payload.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message must not be empty".into(),
                code: "EMPTY_MESSAGE".into(),
            }),
        ));
    }

    let reply = state.orchestrator.respond(&payload.message).await;
    tracing::info!(source = ?reply.source, chars = reply.text.len(), "Answered chat message");

    Ok(Json(ChatResponse {
        message: reply.text,
        source: reply.source,
    }))
}

/// The fact base as JSON
pub async fn knowledge(State(state): State<AppState>) -> Json<FactBase> {
    Json(state.facts.as_ref().clone())
}

/// Opening exchange played by the landing-page widget
pub async fn demo_conversation() -> Json<Vec<DemoLine>> {
    Json(preset_conversation())
}
