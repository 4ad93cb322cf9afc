//! Mailer that submits messages to an SMTP server.
//!
//! Connection security follows `mail.smtp_security`. Credentials are only
//! sent when both `username` and `password` are configured. Connection,
//! protocol and rejection errors are reported as external service failures.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use mensuret_core::config::{MailConfig, SmtpSecurity};
use mensuret_core::error::{AppError, ErrorKind};
use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::{LoginMailer, LoginMessage};

/// SMTP transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
    from: Mailbox,
    subject: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpMailer {
    /// Build from the `[mail]` section. Requires `smtp_host` and a sender
    /// address (`from_address`, or `username` when it is an address).
    pub fn from_config(config: &MailConfig) -> AppResult<Self> {
        let host = config
            .smtp_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| AppError::configuration("mail.smtp_host is required for the smtp provider"))?;

        let address: Address = config
            .from_address()
            .ok_or_else(|| AppError::configuration("mail.from_address is required for the smtp provider"))?
            .parse()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Invalid mail sender address", e)
            })?;

        let builder = match config.smtp_security {
            SmtpSecurity::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
            SmtpSecurity::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)),
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to set up SMTP transport", e)
        })?;

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            host: host.to_string(),
            port: config.smtp_port,
            from: Mailbox::new(Some(config.sender.clone()), address),
            subject: config.subject.clone(),
        })
    }

    fn build_message(&self, message: &LoginMessage) -> AppResult<Message> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Validation, "Invalid recipient address", e)
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body())
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build login mail", e))
    }
}

#[async_trait]
impl LoginMailer for SmtpMailer {
    fn provider_name(&self) -> &str {
        "smtp"
    }

    async fn send_login_link(&self, message: &LoginMessage) -> AppResult<()> {
        let email = self.build_message(message)?;

        let response = self.transport.send(email).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "SMTP delivery failed", e)
        })?;

        debug!(
            to = %message.to,
            host = %self.host,
            code = %response.code(),
            "SMTP server accepted message"
        );
        Ok(())
    }
}
