//! Settings for the `quota` service.
//!
//! Values are read from an optional `settings.toml` next to the binary,
//! then from `QUOTA__*` environment variables (`QUOTA__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Tracing level for the workspace crates.
    pub level: String,
    /// Currency of groups created without an explicit one.
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("settings").required(false))
                .add_source(Environment::with_prefix("QUOTA").separator("__")),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder
            .set_default("app.level", "info")?
            .set_default("app.currency", "INR")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?
            .try_deserialize()
    }
}
