//! Playable output units.

use crate::lipsync::LipsyncData;
use crate::script::{Animation, Expression, Utterance};
use serde::{Deserialize, Serialize};

/// A fully-prepared line the avatar can play: text plus tags plus
/// synthesized audio (base64 mp3) plus mouth-cue timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayableLine {
    pub text: String,
    #[serde(rename = "facialExpression")]
    pub expression: Expression,
    pub animation: Animation,
    /// Base64-encoded compressed audio for the line.
    pub audio: String,
    /// Time-aligned mouth cues for the audio clip.
    pub lipsync: LipsyncData,
}

impl PlayableLine {
    /// Builds a line with no audio or timing data, for canned scripts that
    /// bypass the synthesis pipeline.
    pub fn silent(utterance: Utterance) -> Self {
        Self {
            text: utterance.text,
            expression: utterance.expression,
            animation: utterance.animation,
            audio: String::new(),
            lipsync: LipsyncData::default(),
        }
    }
}

/// The response body for one chat request: playable lines in script order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<PlayableLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_line_wire_shape() {
        let line = PlayableLine {
            text: "Hey!".to_string(),
            expression: Expression::Smile,
            animation: Animation::Talking0,
            audio: "AAAA".to_string(),
            lipsync: LipsyncData::default(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["facialExpression"], "smile");
        assert_eq!(json["animation"], "Talking_0");
        assert_eq!(json["audio"], "AAAA");
        assert!(json["lipsync"]["mouthCues"].is_array());
    }

    #[test]
    fn silent_line_carries_tags() {
        let line = PlayableLine::silent(Utterance::new(
            "Set your keys first.",
            Expression::Sad,
            Animation::Idle,
        ));
        assert!(line.audio.is_empty());
        assert_eq!(line.expression, Expression::Sad);
        assert!(line.lipsync.mouth_cues.is_empty());
    }
}
