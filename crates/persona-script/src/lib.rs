//! Script generation for the Persona avatar backend.
//!
//! Turns a user's chat message into a short scripted reply: an ordered list
//! of [`persona_types::Utterance`]s, each tagged with a facial expression
//! and an animation. The script comes from a chat-completion language model
//! constrained to a fixed JSON reply shape, except for two defined
//! short-circuit cases (empty message, missing provider credentials) which
//! return canned scripts without any external call.

pub mod client;
pub mod error;
pub mod generator;

pub use client::{ChatModelClient, ChatModelConfig};
pub use error::ScriptError;
pub use generator::{Script, ScriptGenerator};
