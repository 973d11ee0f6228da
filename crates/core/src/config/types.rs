use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Inference engine provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineProvider {
    /// Ollama chat API, local or hosted.
    #[default]
    Ollama,
    /// Anthropic messages API.
    Anthropic,
}

impl EngineProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineProvider::Ollama => "ollama",
            EngineProvider::Anthropic => "anthropic",
        }
    }
}

/// Inference engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub provider: EngineProvider,
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Hosted Ollama models and Anthropic need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL. Falls back to the provider's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Per-request timeout in seconds. Unset means wait for the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Maximum tokens for the completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: EngineProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            timeout_secs: None,
            max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

fn default_model() -> String {
    "gpt-oss:120b-cloud".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub engine: SanitizedEngineConfig,
}

/// Sanitized engine config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedEngineConfig {
    pub provider: EngineProvider,
    pub model: String,
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let engine = &config.engine;
        Self {
            engine: SanitizedEngineConfig {
                provider: engine.provider,
                model: engine.model.clone(),
                api_key_configured: engine
                    .api_key
                    .as_deref()
                    .is_some_and(|key| !key.is_empty()),
                api_base: engine.api_base.clone(),
                timeout_secs: engine.timeout_secs,
                max_tokens: engine.max_tokens,
                temperature: engine.temperature,
            },
        }
    }
}
