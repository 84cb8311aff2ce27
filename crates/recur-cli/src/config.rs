use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use recur_core::engine::EngineConfig;
use recur_core::error::CoreError;
use recur_core::timezone::validate_timezone;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Presentation settings for the preview tool
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// strftime pattern for occurrence timestamps in tables
    pub date_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d %H:%M %Z".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Self::figment("recur.toml").extract()
    }

    /// Layered sources: the TOML file, then `RECUR_` environment variables
    /// (`RECUR_ENGINE__MAX_OCCURRENCES=50`). Missing keys keep their defaults.
    pub fn figment(path: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("RECUR_").split("__"))
    }

    /// Rejects settings the engine would only trip over later.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_timezone(&self.engine.default_timezone)
    }
}
