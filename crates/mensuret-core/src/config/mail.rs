//! Login link delivery configuration.

use serde::{Deserialize, Serialize};

/// Transport used to deliver login links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailProvider {
    /// Write the link to the application log instead of sending mail.
    #[default]
    Log,
    /// POST the message to an HTTP mail relay.
    Http,
    /// Submit the message to an SMTP server.
    Smtp,
}

/// Transport security for the `smtp` provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmtpSecurity {
    /// Plain connection upgraded with STARTTLS. The upgrade is mandatory.
    #[default]
    Starttls,
    /// TLS from the first byte, usually on port 465.
    Tls,
    /// No encryption. Only for relays on a trusted local network.
    None,
}

impl std::fmt::Display for MailProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailProvider::Log => write!(f, "log"),
            MailProvider::Http => write!(f, "http"),
            MailProvider::Smtp => write!(f, "smtp"),
        }
    }
}

/// Mail delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Delivery transport.
    #[serde(default)]
    pub provider: MailProvider,
    /// Relay endpoint for the `http` provider.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bearer key sent to the relay, if it requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// SMTP server host for the `smtp` provider.
    #[serde(default)]
    pub smtp_host: Option<String>,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP transport security.
    #[serde(default)]
    pub smtp_security: SmtpSecurity,
    /// SMTP login name.
    #[serde(default)]
    pub username: Option<String>,
    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,
    /// Address in the `From` field. Falls back to `username`.
    #[serde(default)]
    pub from_address: Option<String>,
    /// Display name in the `From` field.
    #[serde(default = "default_sender")]
    pub sender: String,
    /// Message subject.
    #[serde(default = "default_subject")]
    pub subject: String,
    /// Relay request or SMTP exchange timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            endpoint: None,
            api_key: None,
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_security: SmtpSecurity::default(),
            username: None,
            password: None,
            from_address: None,
            sender: default_sender(),
            subject: default_subject(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Envelope sender address for SMTP delivery.
    pub fn from_address(&self) -> Option<&str> {
        self.from_address
            .as_deref()
            .or(self.username.as_deref())
            .filter(|a| !a.is_empty())
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender() -> String {
    "Mensuret Eundo".to_string()
}

fn default_subject() -> String {
    "Log In to Mensuret Eundo".to_string()
}

fn default_timeout() -> u64 {
    10
}
