//! Mailer that writes login links to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::{LoginMailer, LoginMessage};

/// Development transport. Never fails.
#[derive(Debug, Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    /// Create a log mailer that reports `sender` as the From address.
    pub fn new(sender: &str) -> Self {
        Self {
            sender: sender.to_string(),
        }
    }
}

#[async_trait]
impl LoginMailer for LogMailer {
    fn provider_name(&self) -> &str {
        "log"
    }

    async fn send_login_link(&self, message: &LoginMessage) -> AppResult<()> {
        info!(
            from = %self.sender,
            to = %message.to,
            link = %message.link,
            expires_in_minutes = message.expires_in_minutes,
            "Login link (not sent, log provider)"
        );
        Ok(())
    }
}
