//! Scripted utterance model.
//!
//! An [`Utterance`] is one line of model-generated dialogue together with
//! the facial expression and body animation the avatar should play while
//! speaking it. The language model is instructed to reply with at most
//! [`MAX_SCRIPT_LINES`] utterances per request.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::str::FromStr;

/// Maximum number of utterances in one generated script.
pub const MAX_SCRIPT_LINES: usize = 3;

/// Facial expression tag attached to an utterance.
///
/// Wire names are camelCase to match the avatar frontend's morph-target
/// table. Unrecognized tags deserialize to [`Expression::Default`] with a
/// warning rather than failing the whole script: the frontend degrades
/// gracefully on an unknown tag, and a single odd label from the model
/// should not abort an otherwise valid reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expression {
    Smile,
    Sad,
    Angry,
    Surprised,
    FunnyFace,
    #[default]
    Default,
}

impl Expression {
    /// Returns the wire name for this expression.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Surprised => "surprised",
            Self::FunnyFace => "funnyFace",
            Self::Default => "default",
        }
    }
}

impl FromStr for Expression {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smile" => Ok(Self::Smile),
            "sad" => Ok(Self::Sad),
            "angry" => Ok(Self::Angry),
            "surprised" => Ok(Self::Surprised),
            "funnyFace" => Ok(Self::FunnyFace),
            "default" => Ok(Self::Default),
            _ => Err(()),
        }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|()| {
            tracing::warn!(tag = %raw, "unrecognized facial expression tag, using default");
            Self::Default
        }))
    }
}

/// Body animation tag attached to an utterance.
///
/// Wire names match the animation clip names baked into the avatar model
/// (`Talking_0`, `Crying`, ...). Unrecognized tags deserialize to
/// [`Animation::Idle`] with a warning, same leniency as [`Expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    Talking0,
    Talking1,
    Talking2,
    Crying,
    Laughing,
    Rumba,
    #[default]
    Idle,
    Terrified,
    Angry,
}

impl Animation {
    /// Returns the wire name for this animation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Talking0 => "Talking_0",
            Self::Talking1 => "Talking_1",
            Self::Talking2 => "Talking_2",
            Self::Crying => "Crying",
            Self::Laughing => "Laughing",
            Self::Rumba => "Rumba",
            Self::Idle => "Idle",
            Self::Terrified => "Terrified",
            Self::Angry => "Angry",
        }
    }
}

impl FromStr for Animation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Talking_0" => Ok(Self::Talking0),
            "Talking_1" => Ok(Self::Talking1),
            "Talking_2" => Ok(Self::Talking2),
            "Crying" => Ok(Self::Crying),
            "Laughing" => Ok(Self::Laughing),
            "Rumba" => Ok(Self::Rumba),
            "Idle" => Ok(Self::Idle),
            "Terrified" => Ok(Self::Terrified),
            "Angry" => Ok(Self::Angry),
            _ => Err(()),
        }
    }
}

impl Serialize for Animation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Animation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|()| {
            tracing::warn!(tag = %raw, "unrecognized animation tag, using Idle");
            Self::Idle
        }))
    }
}

/// One line of model-generated dialogue, pre-synthesis.
///
/// Immutable once parsed from the model reply; the pipeline only reads it.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Utterance {
    /// The dialogue text to synthesize.
    pub text: String,
    /// Facial expression to hold while the line plays.
    #[serde(rename = "facialExpression", default)]
    pub expression: Expression,
    /// Animation clip to play while the line plays.
    #[serde(default)]
    pub animation: Animation,
}

impl Utterance {
    pub fn new(text: impl Into<String>, expression: Expression, animation: Animation) -> Self {
        Self {
            text: text.into(),
            expression,
            animation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_round_trips_wire_names() {
        for expr in [
            Expression::Smile,
            Expression::Sad,
            Expression::Angry,
            Expression::Surprised,
            Expression::FunnyFace,
            Expression::Default,
        ] {
            assert_eq!(expr.as_str().parse::<Expression>(), Ok(expr));
        }
    }

    #[test]
    fn unknown_expression_falls_back_to_default() {
        let parsed: Expression = serde_json::from_str("\"smirk\"").unwrap();
        assert_eq!(parsed, Expression::Default);
    }

    #[test]
    fn unknown_animation_falls_back_to_idle() {
        let parsed: Animation = serde_json::from_str("\"Backflip\"").unwrap();
        assert_eq!(parsed, Animation::Idle);
    }

    #[test]
    fn utterance_parses_wire_shape() {
        let json = r#"{"text":"Hi there!","facialExpression":"smile","animation":"Talking_1"}"#;
        let utterance: Utterance = serde_json::from_str(json).unwrap();
        assert_eq!(utterance.text, "Hi there!");
        assert_eq!(utterance.expression, Expression::Smile);
        assert_eq!(utterance.animation, Animation::Talking1);
    }

    #[test]
    fn utterance_missing_tags_defaults() {
        let utterance: Utterance = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(utterance.expression, Expression::Default);
        assert_eq!(utterance.animation, Animation::Idle);
    }
}
