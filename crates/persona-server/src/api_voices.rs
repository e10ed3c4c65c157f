//! Voice-catalog pass-through endpoint.

use crate::{ApiError, AppState};
use axum::{Extension, Json};
use serde_json::Value;
use std::sync::Arc;

/// Handler for `GET /voices`.
///
/// Proxies the synthesis provider's voice catalog verbatim so the frontend
/// never needs the provider key.
pub async fn voices_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    let catalog = state
        .synth
        .voices()
        .await
        .map_err(|e| ApiError::BadGateway(e.to_string()))?;
    Ok(Json(catalog))
}
