use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use toml::de::Error as TomlError;

pub static PRODUCTION_CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::try_toml(include_str!("../../docs/config/prod.toml"))
        .expect("Failed to parse prod.toml config file")
});

pub static DEVELOPMENT_CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::try_toml(include_str!("../../docs/config/dev.toml"))
        .expect("Failed to parse dev.toml config file")
});

/// The environment in which the application is running
/// Defaults to [`Environment::Development`]
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum Environment {
    /// The default development setup is a local MongoDB and MQTT broker.
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Development
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017`
    pub database_url: String,
    pub database_name: String,
    /// Maximum number of notifications to return per request
    pub notifications_find_limit: i64,
    /// Host of the MQTT broker the ingestion pipeline subscribes to
    pub broker_host: String,
    pub broker_port: u16,
    /// Topic the sensors publish detections on
    pub broker_topic: String,
    pub broker_client_id: String,
    /// In milliseconds, the delay before re-polling after a broker
    /// connection error
    pub broker_retry_interval: u64,
}

impl Config {
    /// Utility method that will deserialize a Toml file content into a [`Config`].
    ///
    /// Instead of relying on the `toml` crate directly, use this method instead.
    pub fn try_toml(toml: &str) -> Result<Self, TomlError> {
        toml::from_str(toml)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Toml parsing: {0}")]
    Toml(#[from] TomlError),
    #[error("File reading: {0}")]
    InvalidFile(#[from] std::io::Error),
}

/// If no `config_file` path is provided it will load the [`Environment`] configuration.
/// If `config_file` path is provided it will try to read and parse the file in Toml format.
pub fn configuration(
    environment: Environment,
    config_file: Option<&str>,
) -> Result<Config, ConfigError> {
    match config_file {
        Some(config_file) => {
            let content = std::fs::read(config_file)?;

            Ok(toml::from_slice(&content)?)
        }
        None => match environment {
            Environment::Production => Ok(PRODUCTION_CONFIG.clone()),
            Environment::Development => Ok(DEVELOPMENT_CONFIG.clone()),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compiled_in_configs_parse() {
        // force the Lazy cells, a bad Toml file should fail here and
        // not at startup
        assert_eq!("detections", DEVELOPMENT_CONFIG.broker_topic);
        assert_eq!("detections", PRODUCTION_CONFIG.broker_topic);
        assert!(DEVELOPMENT_CONFIG.notifications_find_limit > 0);
    }
}
