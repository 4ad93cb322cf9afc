//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `MENSURET_` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod mail;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::mail::{MailConfig, MailProvider, SmtpSecurity};

use crate::error::AppError;

/// Smallest accepted token size in random bytes.
pub const MIN_TOKEN_BYTES: usize = 16;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (`config/default.toml` + environment overlay + environment variables).
/// Every section falls back to its defaults, so an empty source is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Login and session token settings.
    pub auth: AuthConfig,
    /// Login link delivery settings.
    pub mail: MailConfig,
    /// Record database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default.toml`, the `config/{env}.toml` overlay and
    /// environment variables prefixed with `MENSURET_` (nested keys use
    /// `__`, e.g. `MENSURET_SERVER__PORT`). Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("MENSURET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.token_bytes < MIN_TOKEN_BYTES {
            return Err(AppError::configuration(format!(
                "auth.token_bytes must be at least {MIN_TOKEN_BYTES}, got {}",
                self.auth.token_bytes
            )));
        }

        if self.auth.login_token_ttl_minutes == 0 || self.auth.session_token_ttl_hours == 0 {
            return Err(AppError::configuration("token lifetimes must be non-zero"));
        }

        if self.auth.login_token_ttl() >= self.auth.session_token_ttl() {
            return Err(AppError::configuration(
                "auth.login_token_ttl_minutes must be shorter than the session lifetime",
            ));
        }

        if self.mail.provider == MailProvider::Http
            && self.mail.endpoint.as_deref().is_none_or(str::is_empty)
        {
            return Err(AppError::configuration(
                "mail.endpoint is required when mail.provider = \"http\"",
            ));
        }

        if self.mail.provider == MailProvider::Smtp {
            if self.mail.smtp_host.as_deref().is_none_or(str::is_empty) {
                return Err(AppError::configuration(
                    "mail.smtp_host is required when mail.provider = \"smtp\"",
                ));
            }
            if self.mail.from_address().is_none() {
                return Err(AppError::configuration(
                    "mail.from_address or mail.username is required when mail.provider = \"smtp\"",
                ));
            }
            if self.mail.username.is_some() != self.mail.password.is_some() {
                return Err(AppError::configuration(
                    "mail.username and mail.password must be set together",
                ));
            }
        }

        Ok(())
    }
}
