use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path)))
}

/// Like [`load_config`], but falls back to the built-in defaults when the file
/// does not exist. Environment overrides still apply.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }
    extract(figment)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    // Double underscore separates sections so that keys like
    // `inter_download_delay_secs` survive: TUBECHECK_DOWNLOAD__QUALITY=worst
    figment
        .merge(Env::prefixed("TUBECHECK_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}
