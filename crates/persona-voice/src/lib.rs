//! External-stage adapters for the Persona audio pipeline.
//!
//! Three collaborators turn one scripted line into playable audio plus
//! mouth-cue timing:
//!
//! - [`SynthClient`] — speech synthesis over the ElevenLabs HTTP API,
//!   returning compressed audio bytes in memory (plus the voice-catalog
//!   pass-through used by the `/voices` endpoint).
//! - [`FfmpegTranscoder`] — converts the compressed clip to the canonical
//!   PCM WAV format the timing extractor requires.
//! - [`RhubarbExtractor`] — runs Rhubarb Lip Sync in phonetic mode over the
//!   canonical waveform and parses the timing document it writes.
//!
//! Each adapter is an opaque service from the pipeline's point of view:
//! input in, artifact or typed error out. Subprocess adapters capture
//! stderr into the error message and enforce a per-invocation timeout.

pub mod error;
pub mod extract;
pub mod synth;
pub mod transcode;

pub use error::VoiceError;
pub use extract::RhubarbExtractor;
pub use synth::{SynthClient, SynthConfig};
pub use transcode::FfmpegTranscoder;
