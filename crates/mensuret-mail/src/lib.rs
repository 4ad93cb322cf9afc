//! # mensuret-mail
//!
//! Transports for the login link mail.
//!
//! - `provider::log` writes the link to the log, for local development
//! - `provider::http` posts the message to an HTTP mail relay
//! - `provider::smtp` submits the message to an SMTP server

pub mod provider;

use std::sync::Arc;

use mensuret_core::config::{MailConfig, MailProvider};
use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::LoginMailer;

pub use provider::http::HttpMailer;
pub use provider::log::LogMailer;
pub use provider::smtp::SmtpMailer;

/// Builds the mailer selected by `config.provider`.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn LoginMailer>> {
    let mailer: Arc<dyn LoginMailer> = match config.provider {
        MailProvider::Log => Arc::new(LogMailer::new(&config.sender)),
        MailProvider::Http => Arc::new(HttpMailer::from_config(config)?),
        MailProvider::Smtp => Arc::new(SmtpMailer::from_config(config)?),
    };

    tracing::info!(provider = %config.provider, "Login mailer initialized");

    Ok(mailer)
}
