//! Chat-completion client for an OpenAI-compatible provider.

use crate::error::ScriptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Timeout for one completion request.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the chat-model provider.
#[derive(Clone, Deserialize)]
pub struct ChatModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Default for ChatModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl fmt::Debug for ChatModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatModelConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// HTTP client for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatModelClient {
    client: reqwest::Client,
    config: ChatModelConfig,
}

impl ChatModelClient {
    pub fn new(config: ChatModelConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Sends one system+user exchange and returns the assistant's raw text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, ScriptError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: system,
                },
                RequestMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .timeout(COMPLETION_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScriptError::Provider(format!("completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ScriptError::Provider(format!(
                "completion endpoint returned {}: {}",
                status, detail
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ScriptError::Provider(format!("malformed completion body: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ScriptError::Provider("completion contained no choices".to_string()))?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = ChatModelConfig {
            api_key: "sk-secret".to_string(),
            ..ChatModelConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn completion_response_parses() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"[]"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "[]");
    }
}
