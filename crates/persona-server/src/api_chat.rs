//! Chat endpoint: one user message in, a fully-prepared script out.

use crate::{ApiError, AppState};
use axum::{Extension, Json};
use persona_types::ChatResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Request body for `POST /chat`. A missing or empty `message` is the
/// defined empty-input short-circuit, not an error.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Handler for `POST /chat`.
///
/// Returns either a complete, fully-ordered set of playable lines or an
/// error; never a partially-populated list.
pub async fn chat_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!(chars = payload.message.len(), "chat request");
    let response = state.orchestrator.handle(&payload.message).await?;
    Ok(Json(response))
}
