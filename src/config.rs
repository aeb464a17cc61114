//! Service configuration, read from the environment.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    pub database: DatabaseSettings,

    #[serde(default)]
    pub registration: RegistrationSettings,

    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin of the single-page client allowed through CORS.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    /// Where the client is sent after a successful registration.
    #[serde(default = "default_success_redirect")]
    pub success_redirect: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            success_redirect: default_success_redirect(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8080
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".into()
}

fn default_max_connections() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_success_redirect() -> String {
    "/register/success".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Settings {
    /// Load settings from `.env` and the process environment.
    ///
    /// Nested keys use a double underscore (`DATABASE__URL`). The plain
    /// `DATABASE_URL` used by sqlx tooling is honoured as well.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())
            .context("Failed to apply DATABASE_URL")?;

        Self::from_builder(builder)
    }

    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_everything_but_database_url() {
        let builder = config::Config::builder()
            .set_override("database.url", "postgres://localhost/edulink")
            .unwrap();

        let settings = Settings::from_builder(builder).unwrap();

        assert_eq!(settings.database.url, "postgres://localhost/edulink");
        assert_eq!(settings.database.max_connections, 10);
        assert!(settings.database.run_migrations);
        assert_eq!(settings.bind_address(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(settings.registration.success_redirect, "/register/success");
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn overrides_replace_defaults() {
        let builder = config::Config::builder()
            .set_override("database.url", "postgres://db/edulink")
            .unwrap()
            .set_override("server.port", 9000)
            .unwrap()
            .set_override("registration.success_redirect", "/welcome")
            .unwrap();

        let settings = Settings::from_builder(builder).unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.registration.success_redirect, "/welcome");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(Settings::from_builder(config::Config::builder()).is_err());
    }
}
