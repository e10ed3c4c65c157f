//! Mouth-cue timing documents.
//!
//! The timing extractor (Rhubarb in phonetic mode) emits a JSON document
//! mapping time ranges to mouth shapes. The frontend drives the avatar's
//! viseme morph targets from these cues while the audio clip plays.

use serde::{Deserialize, Serialize};

/// One time-aligned mouth shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthCue {
    /// Cue start, seconds from clip start.
    pub start: f64,
    /// Cue end, seconds from clip start.
    pub end: f64,
    /// Mouth shape label (`A`..`H`, `X` for silence).
    pub value: String,
}

/// Metadata block of the extractor's output document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LipsyncMetadata {
    /// Input waveform path, as reported by the extractor.
    #[serde(default)]
    pub sound_file: String,
    /// Clip duration in seconds.
    #[serde(default)]
    pub duration: f64,
}

/// Complete timing document for one audio clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LipsyncData {
    #[serde(default)]
    pub metadata: LipsyncMetadata,
    #[serde(default)]
    pub mouth_cues: Vec<MouthCue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extractor_document() {
        let json = r#"{
            "metadata": { "soundFile": "message_0.wav", "duration": 1.52 },
            "mouthCues": [
                { "start": 0.00, "end": 0.21, "value": "X" },
                { "start": 0.21, "end": 0.39, "value": "B" }
            ]
        }"#;
        let data: LipsyncData = serde_json::from_str(json).unwrap();
        assert_eq!(data.metadata.duration, 1.52);
        assert_eq!(data.mouth_cues.len(), 2);
        assert_eq!(data.mouth_cues[1].value, "B");
    }

    #[test]
    fn serializes_camel_case() {
        let data = LipsyncData {
            metadata: LipsyncMetadata {
                sound_file: "message_1.wav".to_string(),
                duration: 0.5,
            },
            mouth_cues: vec![MouthCue {
                start: 0.0,
                end: 0.5,
                value: "A".to_string(),
            }],
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("mouthCues").is_some());
        assert_eq!(json["metadata"]["soundFile"], "message_1.wav");
    }
}
