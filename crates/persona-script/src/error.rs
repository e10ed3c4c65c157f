use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    /// The model provider call itself failed (network, auth, quota).
    #[error("model provider request failed: {0}")]
    Provider(String),

    /// The provider answered but the reply text is not a valid script.
    /// Not recovered locally: the whole request fails.
    #[error("model reply is not a valid script: {0}")]
    UnparseableReply(String),
}
