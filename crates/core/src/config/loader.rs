use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Config file picked up from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "whatsurname.toml";

/// Prefix of environment overrides, e.g. `WHATSURNAME_ENGINE__MODEL`.
pub const ENV_PREFIX: &str = "WHATSURNAME_";

/// Credential variable honored as a fallback for `engine.api_key`.
pub const API_KEY_ENV: &str = "OLLAMA_API";

/// Load configuration once at startup.
///
/// Layers, lowest precedence first: built-in defaults, the TOML file,
/// `WHATSURNAME_*` environment variables. `OLLAMA_API` fills in
/// `engine.api_key` only when no other layer set it.
///
/// An explicitly named file must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Some(path) => path,
        None => Path::new(DEFAULT_CONFIG_FILE),
    };

    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .join(
            Env::raw()
                .only(&[API_KEY_ENV])
                .map(|_| "engine.api_key".into()),
        )
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
