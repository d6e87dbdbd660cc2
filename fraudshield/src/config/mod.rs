pub mod log;
pub mod render;

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

pub use log::LoggingConfig;
pub use render::PhysicsConfig;
pub use render::RenderConfig;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub render:  RenderConfig,
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::OpenFileError {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&config_str).map_err(|source| ConfigError::ParseError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(config)
}
