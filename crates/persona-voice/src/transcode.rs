//! ffmpeg transcoder adapter.
//!
//! The timing extractor only accepts PCM WAV input, while the synthesis
//! provider returns mp3. The transcoder bridges the two: compressed bytes
//! in via stdin, canonical waveform out to an explicitly-passed path.
//! Writing to a file rather than a stdout pipe lets ffmpeg seek back and
//! patch the RIFF header sizes, which some WAV readers require.

use crate::error::VoiceError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Timeout for one transcoder invocation.
const TRANSCODE_TIMEOUT: Duration = Duration::from_secs(60);

/// Canonical waveform parameters expected by the timing extractor.
const CANONICAL_SAMPLE_RATE: &str = "44100";
const CANONICAL_CHANNELS: &str = "1";

/// Converts compressed audio clips to canonical PCM WAV via ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Transcodes `audio` (mp3 bytes) to a 16-bit PCM WAV file at `wav_path`.
    ///
    /// Overwrites any existing file at `wav_path` (`-y`), so re-running a
    /// line with the same target is deterministic.
    pub async fn to_wav(&self, audio: &[u8], wav_path: &Path) -> Result<(), VoiceError> {
        let mut command = Command::new(&self.binary);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg("pipe:0")
            .arg("-acodec")
            .arg("pcm_s16le")
            .arg("-ar")
            .arg(CANONICAL_SAMPLE_RATE)
            .arg("-ac")
            .arg(CANONICAL_CHANNELS)
            .arg(wav_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| VoiceError::Transcode(format!("failed to spawn ffmpeg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| VoiceError::Transcode("failed to open ffmpeg stdin".to_string()))?;
        let input = audio.to_vec();

        // Write on a separate task to avoid deadlock if ffmpeg's stderr
        // buffer fills before it drains stdin.
        let write_task = tokio::spawn(async move {
            let result = stdin.write_all(&input).await;
            drop(stdin);
            result
        });

        let output = tokio::time::timeout(TRANSCODE_TIMEOUT, child.wait_with_output())
            .await
            .map_err(|_| {
                VoiceError::Transcode(format!(
                    "ffmpeg timed out after {} seconds",
                    TRANSCODE_TIMEOUT.as_secs()
                ))
            })?
            .map_err(|e| VoiceError::Transcode(format!("failed to wait for ffmpeg: {}", e)))?;

        match write_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                // A closed stdin pipe with a successful exit is fine; ffmpeg
                // stops reading once it has the full stream.
                if !output.status.success() {
                    return Err(VoiceError::Transcode(format!(
                        "failed to write to ffmpeg stdin: {}",
                        e
                    )));
                }
            }
            Err(e) => {
                return Err(VoiceError::Transcode(format!(
                    "stdin writer task failed: {}",
                    e
                )))
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Transcode(format!(
                "ffmpeg failed: {}",
                stderr.trim()
            )));
        }

        debug!(path = %wav_path.display(), "transcoded clip to canonical waveform");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_transcode_error() {
        let scratch = tempfile::tempdir().unwrap();
        let transcoder = FfmpegTranscoder::new("/nonexistent/ffmpeg");
        let result = transcoder
            .to_wav(b"not-audio", &scratch.path().join("out.wav"))
            .await;
        match result {
            Err(VoiceError::Transcode(msg)) => assert!(msg.contains("spawn")),
            other => panic!("expected Transcode error, got {:?}", other),
        }
    }
}
