use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    /// Speech-synthesis provider failure (auth, quota, network).
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Voice-catalog lookup failure.
    #[error("voice catalog error: {0}")]
    Catalog(String),

    /// Transcoder invocation failure or malformed source audio.
    #[error("transcode error: {0}")]
    Transcode(String),

    /// Timing-extractor invocation failure or malformed output document.
    #[error("extraction error: {0}")]
    Extraction(String),
}
