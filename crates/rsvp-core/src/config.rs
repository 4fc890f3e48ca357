use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_SUBMISSIONS, DEFAULT_WINDOW_HOURS};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub sheet: SheetConfig,
    pub notify: NotifyConfig,
    pub wedding: WeddingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origin of the static RSVP site, allowed to post cross-origin.
    pub allowed_origin: Option<String>,
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u8,
}

impl DatabaseConfig {
    /// ## Summary
    /// Returns the connection URL for the Postgres backend.
    ///
    /// ## Errors
    /// Returns a configuration error if no URL was configured.
    pub fn postgres_url(&self) -> CoreResult<&str> {
        self.url.as_deref().ok_or_else(|| {
            CoreError::ConfigError("database.url is required for the postgres backend".to_string())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimitConfig {
    pub max_submissions: u32,
    pub window_hours: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetConfig {
    pub name: String,
}

#[derive(Clone, Deserialize)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from: Option<String>,
    pub reply_to: Option<String>,
}

// Keeps the SMTP password out of Debug output.
impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("reply_to", &self.reply_to)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeddingConfig {
    pub bride: String,
    pub groom: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub ceremony: EventConfig,
    pub reception: EventConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub title: String,
    pub venue: String,
    pub address: String,
    pub time: String,
}

impl Settings {
    fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("server.max_body_bytes", 65_536)?
            .set_default("database.backend", "memory")?
            .set_default("database.max_connections", 4)?
            .set_default("logging.level", "debug")?
            .set_default("rate_limit.max_submissions", DEFAULT_MAX_SUBMISSIONS)?
            .set_default("rate_limit.window_hours", DEFAULT_WINDOW_HOURS)?
            .set_default("sheet.name", "RSVP")?
            .set_default("notify.enabled", false)?
            .set_default("notify.smtp_port", 587)?
            .set_default("wedding.bride", "The Bride")?
            .set_default("wedding.groom", "The Groom")?
            .set_default("wedding.contact_email", "rsvp@example.com")?
            .set_default("wedding.ceremony.title", "Church Ceremony")?
            .set_default("wedding.ceremony.venue", "To be announced")?
            .set_default("wedding.ceremony.address", "")?
            .set_default("wedding.ceremony.time", "")?
            .set_default("wedding.reception.title", "Reception")?
            .set_default("wedding.reception.venue", "To be announced")?
            .set_default("wedding.reception.address", "")?
            .set_default("wedding.reception.time", "")?)
    }

    /// ## Summary
    /// Settings built from the defaults alone, ignoring files and environment.
    ///
    /// ## Errors
    /// Returns an error if the defaults fail to deserialize.
    pub fn defaults() -> Result<Self> {
        Ok(Self::with_defaults()?.build()?.try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// Environment keys use the `RSVP_` prefix and `__` between sections,
    /// e.g. `RSVP_RATE_LIMIT__MAX_SUBMISSIONS=5`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::with_defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env file / process environment
            .add_source(
                config::Environment::with_prefix("RSVP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
