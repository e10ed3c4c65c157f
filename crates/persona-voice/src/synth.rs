//! ElevenLabs speech-synthesis client.

use crate::error::VoiceError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

/// Maximum text input size for one synthesis request. Prevents resource
/// exhaustion from oversized requests; the provider rejects long inputs
/// anyway.
const MAX_SYNTH_INPUT_BYTES: usize = 8 * 1024;

/// Timeout for one provider HTTP call.
const SYNTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the speech-synthesis provider.
#[derive(Clone, Deserialize)]
pub struct SynthConfig {
    pub api_key: String,
    /// Provider voice identifier used for every line.
    pub voice_id: String,
    pub base_url: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id: "kgG7dCoKCfLehAPWkJOE".to_string(),
            base_url: "https://api.elevenlabs.io".to_string(),
        }
    }
}

impl fmt::Debug for SynthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynthConfig")
            .field("api_key", &"[REDACTED]")
            .field("voice_id", &self.voice_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// HTTP client for speech synthesis and the voice catalog.
#[derive(Debug, Clone)]
pub struct SynthClient {
    client: reqwest::Client,
    config: SynthConfig,
}

impl SynthClient {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Synthesizes one line of text, returning compressed audio (mp3) bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        if text.len() > MAX_SYNTH_INPUT_BYTES {
            return Err(VoiceError::Synthesis(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_SYNTH_INPUT_BYTES
            )));
        }

        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url, self.config.voice_id
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .timeout(SYNTH_TIMEOUT)
            .json(&json!({
                "text": text,
                "model_id": "eleven_monolingual_v1",
            }))
            .send()
            .await
            .map_err(|e| VoiceError::Synthesis(format!("synthesis request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VoiceError::Synthesis(format!(
                "synthesis endpoint returned {}: {}",
                status, detail
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| VoiceError::Synthesis(format!("failed to read audio body: {}", e)))?;

        if audio.is_empty() {
            return Err(VoiceError::Synthesis(
                "provider returned an empty audio clip".to_string(),
            ));
        }

        Ok(audio.to_vec())
    }

    /// Fetches the provider's voice catalog, passed through verbatim.
    pub async fn voices(&self) -> Result<Value, VoiceError> {
        let url = format!("{}/v1/voices", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .header("xi-api-key", &self.config.api_key)
            .timeout(SYNTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| VoiceError::Catalog(format!("catalog request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VoiceError::Catalog(format!(
                "catalog endpoint returned {}: {}",
                status, detail
            )));
        }

        response
            .json()
            .await
            .map_err(|e| VoiceError::Catalog(format!("malformed catalog body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = SynthConfig {
            api_key: "xi-secret".to_string(),
            ..SynthConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("xi-secret"));
    }

    #[tokio::test]
    async fn oversized_input_is_rejected_locally() {
        let client = SynthClient::new(SynthConfig::default());
        let text = "a".repeat(MAX_SYNTH_INPUT_BYTES + 1);
        let result = client.synthesize(&text).await;
        match result {
            Err(VoiceError::Synthesis(msg)) => assert!(msg.contains("maximum size")),
            other => panic!("expected Synthesis error, got {:?}", other),
        }
    }
}
