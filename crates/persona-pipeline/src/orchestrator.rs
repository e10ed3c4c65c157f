//! Request orchestration: script generation plus per-line processing.

use crate::error::PipelineError;
use crate::line::LineProcessor;
use crate::stages::ScriptSource;
use persona_script::Script;
use persona_types::{ChatResponse, PlayableLine};
use std::sync::Arc;
use tracing::{debug, info};

/// Handles one chat request end to end.
///
/// Canned scripts (empty message, missing credentials) return immediately
/// without touching the audio pipeline. Generated scripts run every line
/// through the [`LineProcessor`] in index order; the response always
/// carries the lines in the same order the script produced them, and any
/// line failure fails the whole request.
pub struct Orchestrator {
    script: Arc<dyn ScriptSource>,
    processor: LineProcessor,
}

impl Orchestrator {
    pub fn new(script: Arc<dyn ScriptSource>, processor: LineProcessor) -> Self {
        Self { script, processor }
    }

    pub async fn handle(&self, user_message: &str) -> Result<ChatResponse, PipelineError> {
        let utterances = match self.script.generate(user_message).await? {
            Script::Canned(lines) => {
                debug!(lines = lines.len(), "serving canned script");
                return Ok(ChatResponse {
                    messages: lines.into_iter().map(PlayableLine::silent).collect(),
                });
            }
            Script::Generated(lines) => lines,
        };

        // Request-scoped scratch directory: artifacts are named by line
        // index inside it, and concurrent requests never share paths. The
        // directory is removed when this handle returns.
        let scratch = tempfile::tempdir()?;

        let mut messages = Vec::with_capacity(utterances.len());
        for (index, utterance) in utterances.iter().enumerate() {
            let line = self.processor.process(utterance, index, scratch.path()).await?;
            messages.push(line);
        }

        info!(lines = messages.len(), "prepared chat response");
        Ok(ChatResponse { messages })
    }
}
