use persona_script::ScriptError;
use persona_voice::VoiceError;
use thiserror::Error;

/// One error kind per pipeline stage, so a caller can tell which external
/// collaborator failed. None of these are retried; the first one aborts the
/// whole request.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Script generation failed (provider error or unparseable reply).
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// The speech-synthesis stage failed.
    #[error("synthesis stage failed: {0}")]
    Synthesis(String),

    /// The waveform-transcode stage failed.
    #[error("transcode stage failed: {0}")]
    Transcode(String),

    /// The timing-extraction stage failed.
    #[error("timing extraction stage failed: {0}")]
    Extraction(String),

    /// The request-scoped scratch directory could not be created.
    #[error("scratch workspace error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl From<VoiceError> for PipelineError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Synthesis(msg) | VoiceError::Catalog(msg) => Self::Synthesis(msg),
            VoiceError::Transcode(msg) => Self::Transcode(msg),
            VoiceError::Extraction(msg) => Self::Extraction(msg),
        }
    }
}
