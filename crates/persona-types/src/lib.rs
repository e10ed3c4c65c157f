//! Shared types and constants for the Persona avatar backend.
//!
//! This crate provides the data model used across all Persona crates: the
//! scripted utterances the language model produces, the mouth-cue timing
//! documents the lipsync extractor emits, and the fully-assembled playable
//! lines returned to the avatar frontend.
//!
//! No crate in the workspace depends on anything *except* `persona-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

pub mod line;
pub mod lipsync;
pub mod script;

pub use line::{ChatResponse, PlayableLine};
pub use lipsync::{LipsyncData, LipsyncMetadata, MouthCue};
pub use script::{Animation, Expression, Utterance, MAX_SCRIPT_LINES};
