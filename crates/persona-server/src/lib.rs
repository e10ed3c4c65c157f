//! Persona server library logic.

pub mod api_chat;
pub mod api_voices;
pub mod config;

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use persona_pipeline::{LineProcessor, Orchestrator, PipelineError};
use persona_script::{ChatModelClient, ChatModelConfig, ScriptGenerator};
use persona_voice::{FfmpegTranscoder, RhubarbExtractor, SynthClient, SynthConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
pub struct AppState {
    /// The chat pipeline orchestrator.
    pub orchestrator: Orchestrator,
    /// Synthesis client, also serving the voice-catalog pass-through.
    pub synth: Arc<SynthClient>,
}

impl AppState {
    /// Wires the pipeline from loaded configuration.
    ///
    /// When either provider key is missing the script generator is built
    /// unconfigured: every chat request short-circuits to the canned script
    /// and the audio stages are never invoked.
    pub fn from_config(config: &config::Config) -> Self {
        let chat_client = if config.providers_configured() {
            Some(ChatModelClient::new(ChatModelConfig {
                api_key: config.openai.api_key.clone(),
                model: config.openai.model.clone(),
                base_url: config.openai.base_url.clone(),
            }))
        } else {
            tracing::warn!("provider credentials missing, chat will serve the canned script");
            None
        };

        let synth = Arc::new(SynthClient::new(SynthConfig {
            api_key: config.elevenlabs.api_key.clone(),
            voice_id: config.elevenlabs.voice_id.clone(),
            base_url: config.elevenlabs.base_url.clone(),
        }));

        let processor = LineProcessor::new(
            synth.clone(),
            Arc::new(FfmpegTranscoder::new(&config.tools.ffmpeg_binary)),
            Arc::new(RhubarbExtractor::new(&config.tools.rhubarb_binary)),
        );

        Self {
            orchestrator: Orchestrator::new(Arc::new(ScriptGenerator::new(chat_client)), processor),
            synth,
        }
    }
}

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("upstream failure: {0}")]
    BadGateway(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            // Scratch-dir failures are our own, not an upstream's.
            PipelineError::Scratch(e) => Self::InternalServerError(e.to_string()),
            other => Self::BadGateway(other.to_string()),
        }
    }
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/voices", get(api_voices::voices_handler))
        .route("/chat", post(api_chat::chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
