//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Language-model provider settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Speech-synthesis provider settings.
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// External tool binaries.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Language-model provider configuration. An empty `api_key` means the
/// provider is not configured and chat requests get the canned
/// "unconfigured" script.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_openai_model")]
    pub model: String,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
}

/// Speech-synthesis provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: String,

    /// Fixed voice identifier used for every synthesized line.
    #[serde(default = "default_voice_id")]
    pub voice_id: String,

    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,
}

/// Paths to the external audio tools.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_ffmpeg_binary")]
    pub ffmpeg_binary: String,

    #[serde(default = "default_rhubarb_binary")]
    pub rhubarb_binary: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "persona_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_voice_id() -> String {
    "kgG7dCoKCfLehAPWkJOE".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_ffmpeg_binary() -> String {
    "ffmpeg".to_string()
}

fn default_rhubarb_binary() -> String {
    "rhubarb".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_openai_model(),
            base_url: default_openai_base_url(),
        }
    }
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id: default_voice_id(),
            base_url: default_elevenlabs_base_url(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_binary: default_ffmpeg_binary(),
            rhubarb_binary: default_rhubarb_binary(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Config {
    /// True when both provider keys are present; without them the pipeline
    /// is bypassed and chat requests get the canned unconfigured script.
    pub fn providers_configured(&self) -> bool {
        !self.openai.api_key.is_empty() && !self.elevenlabs.api_key.is_empty()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `PERSONA_HOST` overrides `server.host`
/// - `PERSONA_PORT` overrides `server.port`
/// - `PERSONA_OPENAI_API_KEY` overrides `openai.api_key`
/// - `PERSONA_OPENAI_MODEL` overrides `openai.model`
/// - `PERSONA_ELEVENLABS_API_KEY` overrides `elevenlabs.api_key`
/// - `PERSONA_VOICE_ID` overrides `elevenlabs.voice_id`
/// - `PERSONA_FFMPEG` overrides `tools.ffmpeg_binary`
/// - `PERSONA_RHUBARB` overrides `tools.rhubarb_binary`
/// - `PERSONA_LOG_LEVEL` overrides `logging.level`
/// - `PERSONA_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("PERSONA_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("PERSONA_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(key) = std::env::var("PERSONA_OPENAI_API_KEY") {
        config.openai.api_key = key;
    }
    if let Ok(model) = std::env::var("PERSONA_OPENAI_MODEL") {
        config.openai.model = model;
    }
    if let Ok(key) = std::env::var("PERSONA_ELEVENLABS_API_KEY") {
        config.elevenlabs.api_key = key;
    }
    if let Ok(voice) = std::env::var("PERSONA_VOICE_ID") {
        config.elevenlabs.voice_id = voice;
    }
    if let Ok(ffmpeg) = std::env::var("PERSONA_FFMPEG") {
        config.tools.ffmpeg_binary = ffmpeg;
    }
    if let Ok(rhubarb) = std::env::var("PERSONA_RHUBARB") {
        config.tools.rhubarb_binary = rhubarb;
    }
    if let Ok(level) = std::env::var("PERSONA_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("PERSONA_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = Config::default();
        assert!(!config.providers_configured());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.tools.ffmpeg_binary, "ffmpeg");
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [openai]
            api_key = "sk-test"

            [elevenlabs]
            api_key = "xi-test"
            voice_id = "abc123"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.providers_configured());
        assert_eq!(config.elevenlabs.voice_id, "abc123");
        // Untouched sections keep their defaults.
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn one_missing_key_is_unconfigured() {
        let config: Config = toml::from_str(
            r#"
            [openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        assert!(!config.providers_configured());
    }
}
