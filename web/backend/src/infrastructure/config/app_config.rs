use config::{Config, ConfigError, Environment, File};
use fraudshield::config::RenderConfig;
use serde::Deserialize;
use std::env;

/// 10 MiB
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Upper bound for both the multipart upload and the raw API body.
    pub max_file_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("upload.max_file_bytes", DEFAULT_MAX_FILE_BYTES as i64)?
            // Add in settings from config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in settings from environment variables with prefix FRAUDSHIELD__
            // E.g. `FRAUDSHIELD__SERVER__PORT=9000 ./target/app` would set `server.port`
            .add_source(Environment::with_prefix("fraudshield").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_without_environment() {
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upload.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert_eq!(config.render.normal_color, "red");
        assert_eq!(config.render.flagged_color, "yellow");
    }
}
