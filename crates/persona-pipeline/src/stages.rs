//! Stage traits and adapters for the external collaborators.
//!
//! Each stage is a typed function over explicitly-passed artifacts: the
//! synthesizer returns audio bytes in memory, the transcoder and extractor
//! take the paths they read and write. Nothing is coupled through implicit
//! naming conventions; the [`crate::LineProcessor`] owns artifact naming
//! inside the request's scratch directory.

use crate::error::PipelineError;
use async_trait::async_trait;
use persona_script::{Script, ScriptGenerator};
use persona_types::LipsyncData;
use persona_voice::{FfmpegTranscoder, RhubarbExtractor, SynthClient};
use std::path::Path;

/// Produces the scripted reply for a user message.
#[async_trait]
pub trait ScriptSource: Send + Sync {
    async fn generate(&self, user_message: &str) -> Result<Script, PipelineError>;
}

/// Synthesizes one line of text into compressed audio bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Converts compressed audio to the canonical waveform at `wav_path`.
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn to_wav(&self, audio: &[u8], wav_path: &Path) -> Result<(), PipelineError>;
}

/// Extracts mouth-cue timing from the waveform at `wav_path`, writing the
/// timing document to `timing_path`.
#[async_trait]
pub trait TimingExtractor: Send + Sync {
    async fn extract(
        &self,
        wav_path: &Path,
        timing_path: &Path,
    ) -> Result<LipsyncData, PipelineError>;
}

#[async_trait]
impl ScriptSource for ScriptGenerator {
    async fn generate(&self, user_message: &str) -> Result<Script, PipelineError> {
        Ok(ScriptGenerator::generate(self, user_message).await?)
    }
}

#[async_trait]
impl SpeechSynthesizer for SynthClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        Ok(SynthClient::synthesize(self, text).await?)
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn to_wav(&self, audio: &[u8], wav_path: &Path) -> Result<(), PipelineError> {
        Ok(FfmpegTranscoder::to_wav(self, audio, wav_path).await?)
    }
}

#[async_trait]
impl TimingExtractor for RhubarbExtractor {
    async fn extract(
        &self,
        wav_path: &Path,
        timing_path: &Path,
    ) -> Result<LipsyncData, PipelineError> {
        Ok(RhubarbExtractor::extract(self, wav_path, timing_path).await?)
    }
}
