use super::{types::Config, ConfigError, EngineProvider};

/// Validate configuration
/// Currently validates:
/// - Model name is not blank
/// - timeout_secs, when set, is not 0
/// - max_tokens is not 0
/// - temperature is within 0.0..=2.0
/// - Anthropic has an API key
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let engine = &config.engine;

    if engine.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "engine.model cannot be empty".to_string(),
        ));
    }

    if engine.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "engine.timeout_secs cannot be 0 (leave it unset to disable the timeout)".to_string(),
        ));
    }

    if engine.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_tokens cannot be 0".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&engine.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "engine.temperature must be between 0.0 and 2.0, got {}",
            engine.temperature
        )));
    }

    if engine.provider == EngineProvider::Anthropic
        && engine.api_key.as_deref().is_none_or(str::is_empty)
    {
        return Err(ConfigError::ValidationError(
            "engine.api_key must be set when provider = \"anthropic\"".to_string(),
        ));
    }

    Ok(())
}
