//! Mailer that hands messages to an HTTP mail relay.
//!
//! The relay receives a JSON document `{from, to, subject, text}` via POST.
//! An optional API key is sent as a bearer token. Any transport error or
//! non-2xx status is reported as an external service failure.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use mensuret_core::config::MailConfig;
use mensuret_core::error::{AppError, ErrorKind};
use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::{LoginMailer, LoginMessage};

#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// HTTP relay transport.
///
/// Clone is cheap: `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    sender: String,
    subject: String,
}

impl HttpMailer {
    /// Build from the `[mail]` section. Requires `endpoint`.
    pub fn from_config(config: &MailConfig) -> AppResult<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::configuration("mail.endpoint is required for the http provider"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build mail relay HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            sender: config.sender.clone(),
            subject: config.subject.clone(),
        })
    }
}

#[async_trait]
impl LoginMailer for HttpMailer {
    fn provider_name(&self) -> &str {
        "http"
    }

    async fn send_login_link(&self, message: &LoginMessage) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.sender,
            to: &message.to,
            subject: &self.subject,
            text: message.body(),
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Mail relay request failed", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Mail relay responded with {status}"
            )));
        }

        debug!(to = %message.to, status = %status, "Mail relay accepted message");
        Ok(())
    }
}
