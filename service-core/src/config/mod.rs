use crate::error::AppError;
use config::{
    Config as Cfg, File,
    builder::{ConfigBuilder, DefaultState},
};
use serde::Deserialize;

/// Settings shared by every service: listen port and telemetry.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint. Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl Config {
    /// Loads `.env`, an optional `configuration.*` file and `APP__*` variables,
    /// later sources overriding earlier ones.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_builder(
            Cfg::builder()
                .add_source(File::with_name("configuration").required(false))
                .add_source(config::Environment::with_prefix("APP").separator("__")),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppError> {
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
