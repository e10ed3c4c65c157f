//! Script generation and reply parsing.

use crate::client::ChatModelClient;
use crate::error::ScriptError;
use persona_types::{Animation, Expression, Utterance, MAX_SCRIPT_LINES};
use serde_json::Value;
use tracing::{debug, warn};

/// Fixed system instruction constraining the model to the script shape.
const SYSTEM_PROMPT: &str = "\
You are a virtual companion.
You will always reply with a JSON array of messages. With a maximum of 3 messages.
Each message has a text, facialExpression, and animation property.
The different facial expressions are: smile, sad, angry, surprised, funnyFace, and default.
The different animations are: Talking_0, Talking_1, Talking_2, Crying, Laughing, Rumba, Idle, Terrified, and Angry.
";

/// A generated or canned script.
///
/// Canned scripts come from the defined short-circuit cases and bypass the
/// audio pipeline entirely; generated scripts run every line through it.
#[derive(Debug, Clone, PartialEq)]
pub enum Script {
    /// Fixed reply for a short-circuit case; served without synthesis.
    Canned(Vec<Utterance>),
    /// Model-produced reply; each line goes through the audio pipeline.
    Generated(Vec<Utterance>),
}

impl Script {
    pub fn utterances(&self) -> &[Utterance] {
        match self {
            Self::Canned(lines) | Self::Generated(lines) => lines,
        }
    }
}

/// Fixed greeting served when the user message is empty.
fn greeting_script() -> Vec<Utterance> {
    vec![
        Utterance::new(
            "Hey there! How was your day?",
            Expression::Smile,
            Animation::Talking1,
        ),
        Utterance::new(
            "I missed you... tell me everything!",
            Expression::Sad,
            Animation::Talking0,
        ),
    ]
}

/// Fixed reply served when provider credentials are missing.
fn unconfigured_script() -> Vec<Utterance> {
    vec![
        Utterance::new(
            "Please don't forget to add your API keys!",
            Expression::Angry,
            Animation::Angry,
        ),
        Utterance::new(
            "You don't want to run up a huge bill on a side project, do you?",
            Expression::Smile,
            Animation::Laughing,
        ),
    ]
}

/// Produces a script for one user message.
///
/// Construct with `new(Some(client))` when the deployment has working
/// provider credentials, `new(None)` otherwise; an unconfigured generator
/// never makes an external call.
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    client: Option<ChatModelClient>,
}

impl ScriptGenerator {
    pub fn new(client: Option<ChatModelClient>) -> Self {
        Self { client }
    }

    /// Returns the script for `user_message`.
    ///
    /// Empty input and missing credentials are defined short-circuits, not
    /// errors: they yield [`Script::Canned`]. A malformed model reply is an
    /// error and propagates ([`ScriptError::UnparseableReply`]).
    pub async fn generate(&self, user_message: &str) -> Result<Script, ScriptError> {
        let trimmed = user_message.trim();
        if trimmed.is_empty() {
            debug!("empty user message, serving greeting script");
            return Ok(Script::Canned(greeting_script()));
        }

        let Some(client) = &self.client else {
            warn!("provider credentials missing, serving unconfigured script");
            return Ok(Script::Canned(unconfigured_script()));
        };

        let reply = client.complete(SYSTEM_PROMPT, trimmed).await?;
        let utterances = parse_script(&reply)?;
        debug!(lines = utterances.len(), "parsed model script");
        Ok(Script::Generated(utterances))
    }
}

/// Parses the model's raw reply text into an utterance list.
///
/// Accepts either a bare JSON array or an envelope object with a `messages`
/// field. Markdown code fences around the JSON are stripped first; models
/// add them often enough that rejecting fenced replies would fail otherwise
/// valid scripts. Lists longer than [`MAX_SCRIPT_LINES`] are truncated.
pub fn parse_script(reply: &str) -> Result<Vec<Utterance>, ScriptError> {
    let body = strip_code_fence(reply.trim());

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ScriptError::UnparseableReply(format!("not valid JSON: {}", e)))?;

    let list = match value {
        Value::Object(mut obj) => obj
            .remove("messages")
            .ok_or_else(|| {
                ScriptError::UnparseableReply(
                    "object reply has no `messages` field".to_string(),
                )
            })?,
        other => other,
    };

    let mut utterances: Vec<Utterance> = serde_json::from_value(list)
        .map_err(|e| ScriptError::UnparseableReply(format!("not a message list: {}", e)))?;

    if utterances.len() > MAX_SCRIPT_LINES {
        warn!(
            lines = utterances.len(),
            max = MAX_SCRIPT_LINES,
            "model exceeded line limit, truncating"
        );
        utterances.truncate(MAX_SCRIPT_LINES);
    }

    Ok(utterances)
}

/// Strips a surrounding Markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.strip_suffix("```").map(str::trim).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_array() {
        let reply = r#"[{"text":"Hi!","facialExpression":"smile","animation":"Talking_0"}]"#;
        let lines = parse_script(reply).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].expression, Expression::Smile);
    }

    #[test]
    fn unwraps_messages_envelope() {
        let reply = r#"{"messages":[{"text":"One"},{"text":"Two"}]}"#;
        let lines = parse_script(reply).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "Two");
    }

    #[test]
    fn strips_markdown_fence() {
        let reply = "```json\n[{\"text\":\"Fenced\"}]\n```";
        let lines = parse_script(reply).unwrap();
        assert_eq!(lines[0].text, "Fenced");
    }

    #[test]
    fn rejects_non_json_reply() {
        let err = parse_script("Sorry, I can't do that.").unwrap_err();
        assert!(matches!(err, ScriptError::UnparseableReply(_)));
    }

    #[test]
    fn rejects_object_without_messages() {
        let err = parse_script(r#"{"reply":"hi"}"#).unwrap_err();
        assert!(matches!(err, ScriptError::UnparseableReply(_)));
    }

    #[test]
    fn truncates_to_line_limit() {
        let reply = r#"[{"text":"1"},{"text":"2"},{"text":"3"},{"text":"4"}]"#;
        let lines = parse_script(reply).unwrap();
        assert_eq!(lines.len(), MAX_SCRIPT_LINES);
        assert_eq!(lines.last().unwrap().text, "3");
    }

    #[tokio::test]
    async fn empty_message_short_circuits() {
        let generator = ScriptGenerator::new(None);
        let script = generator.generate("   ").await.unwrap();
        assert!(matches!(script, Script::Canned(_)));
        assert_eq!(script.utterances()[0].text, "Hey there! How was your day?");
    }

    #[tokio::test]
    async fn missing_credentials_short_circuits() {
        let generator = ScriptGenerator::new(None);
        let script = generator.generate("hello").await.unwrap();
        match script {
            Script::Canned(lines) => {
                assert!(lines[0].text.contains("API keys"));
            }
            Script::Generated(_) => panic!("unconfigured generator must not generate"),
        }
    }
}
