//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod frontend;
pub mod logging;
pub mod mail;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, PasswordAlgorithm};
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::frontend::FrontendConfig;
pub use self::logging::LoggingConfig;
pub use self::mail::{MailConfig, MailTransport};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session token and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound mail settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Frontend the reset links point at.
    #[serde(default)]
    pub frontend: FrontendConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SHOPHUB__`. The unprefixed
    /// `APP_SECRET`, `FRONTEND_URL` and `DATABASE_URL` variables are honoured
    /// last so existing deployments keep working.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SHOPHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.app_secret", std::env::var("APP_SECRET").ok())?
            .set_override_option("frontend.url", std::env::var("FRONTEND_URL").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Reject configurations that would be unsafe to serve with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.app_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.app_secret must not be empty"));
        }
        if self.frontend.url.trim().is_empty() {
            return Err(AppError::configuration("frontend.url must not be empty"));
        }
        if self.database.backend == DatabaseBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
            frontend: FrontendConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
