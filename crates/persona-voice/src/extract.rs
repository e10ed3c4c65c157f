//! Rhubarb Lip Sync timing-extractor adapter.

use crate::error::VoiceError;
use persona_types::LipsyncData;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Timeout for one extractor invocation.
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs Rhubarb in phonetic mode over a canonical waveform and parses the
/// timing document it writes.
#[derive(Debug, Clone)]
pub struct RhubarbExtractor {
    binary: PathBuf,
}

impl RhubarbExtractor {
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Extracts mouth cues from the WAV at `wav_path`, writing the JSON
    /// document to `timing_path` and returning its parsed form.
    ///
    /// Overwrites any existing document at `timing_path`.
    pub async fn extract(
        &self,
        wav_path: &Path,
        timing_path: &Path,
    ) -> Result<LipsyncData, VoiceError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-f")
            .arg("json")
            .arg("-o")
            .arg(timing_path)
            .arg(wav_path)
            .arg("-r")
            .arg("phonetic")
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let child = command
            .spawn()
            .map_err(|e| VoiceError::Extraction(format!("failed to spawn rhubarb: {}", e)))?;

        let output = tokio::time::timeout(EXTRACT_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Extraction(format!(
                    "rhubarb timed out after {} seconds",
                    EXTRACT_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Extraction(format!("failed to wait for rhubarb: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Extraction(format!(
                "rhubarb failed: {}",
                stderr.trim()
            )));
        }

        let document = tokio::fs::read_to_string(timing_path).await.map_err(|e| {
            VoiceError::Extraction(format!(
                "failed to read timing document {}: {}",
                timing_path.display(),
                e
            ))
        })?;

        let data: LipsyncData = serde_json::from_str(&document)
            .map_err(|e| VoiceError::Extraction(format!("malformed timing document: {}", e)))?;

        debug!(
            cues = data.mouth_cues.len(),
            path = %timing_path.display(),
            "extracted mouth cues"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_an_extraction_error() {
        let scratch = tempfile::tempdir().unwrap();
        let extractor = RhubarbExtractor::new("/nonexistent/rhubarb");
        let result = extractor
            .extract(
                &scratch.path().join("in.wav"),
                &scratch.path().join("out.json"),
            )
            .await;
        match result {
            Err(VoiceError::Extraction(msg)) => assert!(msg.contains("spawn")),
            other => panic!("expected Extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_document_is_an_extraction_error() {
        // `true` exits 0 without writing the document, so the read fails.
        let scratch = tempfile::tempdir().unwrap();
        let extractor = RhubarbExtractor::new("/bin/true");
        let result = extractor
            .extract(
                &scratch.path().join("in.wav"),
                &scratch.path().join("out.json"),
            )
            .await;
        assert!(matches!(result, Err(VoiceError::Extraction(_))));
    }
}
