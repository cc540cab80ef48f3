use crate::domain::tag::TagMarkers;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub tags: TagMarkers,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub key: String,
    pub token: String,
    #[serde(default = "default_api_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_api_version() -> String {
    "0.1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("NAVIGATION").separator("__")
}

/// Load `config/navigation.*`, overridden by `NAVIGATION__<SECTION>__<KEY>` variables.
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_from(environment())
}

fn load_config_from(environment: config::Environment) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/navigation").required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}
