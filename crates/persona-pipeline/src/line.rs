//! The line processor: one utterance in, one playable line out.

use crate::error::PipelineError;
use crate::stages::{SpeechSynthesizer, TimingExtractor, Transcoder};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use persona_types::{PlayableLine, Utterance};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Drives one utterance through the stage sequence.
///
/// Stages run strictly in order within a line: each consumes the artifact
/// the previous one produced. Artifacts are addressed by the line's
/// sequence index inside the request's scratch directory, so re-processing
/// the same `(text, index)` overwrites the same paths deterministically.
#[derive(Clone)]
pub struct LineProcessor {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    transcoder: Arc<dyn Transcoder>,
    extractor: Arc<dyn TimingExtractor>,
}

impl LineProcessor {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        transcoder: Arc<dyn Transcoder>,
        extractor: Arc<dyn TimingExtractor>,
    ) -> Self {
        Self {
            synthesizer,
            transcoder,
            extractor,
        }
    }

    /// Processes one scripted line.
    ///
    /// `index` is the line's 0-based position in the script; `scratch` is
    /// the request-scoped directory holding intermediate artifacts.
    pub async fn process(
        &self,
        utterance: &Utterance,
        index: usize,
        scratch: &Path,
    ) -> Result<PlayableLine, PipelineError> {
        let started = Instant::now();

        let audio = self.synthesizer.synthesize(&utterance.text).await?;
        info!(
            index,
            bytes = audio.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "synthesized line"
        );

        let wav_path = scratch.join(format!("message_{}.wav", index));
        self.transcoder.to_wav(&audio, &wav_path).await?;
        info!(
            index,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversion done"
        );

        let timing_path = scratch.join(format!("message_{}.json", index));
        let lipsync = self.extractor.extract(&wav_path, &timing_path).await?;
        info!(
            index,
            cues = lipsync.mouth_cues.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lip sync done"
        );

        Ok(PlayableLine {
            text: utterance.text.clone(),
            expression: utterance.expression,
            animation: utterance.animation,
            audio: STANDARD.encode(&audio),
            lipsync,
        })
    }
}
