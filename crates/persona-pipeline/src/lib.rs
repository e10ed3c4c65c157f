//! The per-line generation pipeline and its orchestrator.
//!
//! This crate is the core of the Persona backend: given one user message it
//! obtains a scripted reply, then drives each scripted line through
//! synthesis → transcoding → timing extraction → encoding, producing
//! fully-playable lines in the script's original order.
//!
//! The external collaborators (language model, synthesis provider, ffmpeg,
//! Rhubarb) sit behind the stage traits in [`stages`], so the sequencing and
//! failure-propagation contract can be tested against stubs. Concrete
//! adapters for the real services live in `persona-script`/`persona-voice`
//! and implement the traits here.
//!
//! Failure contract: no stage is retried; the first failure in any stage of
//! any line aborts the whole request. Partial results are never surfaced.

pub mod error;
pub mod line;
pub mod orchestrator;
pub mod stages;

pub use error::PipelineError;
pub use line::LineProcessor;
pub use orchestrator::Orchestrator;
pub use stages::{ScriptSource, SpeechSynthesizer, TimingExtractor, Transcoder};
