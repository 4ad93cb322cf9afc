//! Mailer trait for pluggable login link delivery.

use async_trait::async_trait;

use crate::result::AppResult;

/// A login link addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginMessage {
    /// Recipient address, as submitted by the user.
    pub to: String,
    /// Link carrying the login token (`<base-url>?t=<token>`).
    pub link: String,
    /// Minutes until the embedded token expires.
    pub expires_in_minutes: u64,
}

impl LoginMessage {
    /// Plain-text message body.
    pub fn body(&self) -> String {
        format!(
            "Log in via this link (expires in {} minutes): {}",
            self.expires_in_minutes, self.link
        )
    }
}

/// Trait for login link transports (log output, HTTP relay, ...).
///
/// Implementations report transport failures as
/// [`ErrorKind::ExternalService`](crate::error::ErrorKind::ExternalService)
/// errors. They are never called while a token store lock is held.
#[async_trait]
pub trait LoginMailer: Send + Sync + std::fmt::Debug + 'static {
    /// Short name of the transport, used in logs.
    fn provider_name(&self) -> &str;

    /// Deliver one login link.
    async fn send_login_link(&self, message: &LoginMessage) -> AppResult<()>;
}
