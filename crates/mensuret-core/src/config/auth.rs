//! Token lifetime configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Login and session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of emailed login tokens in minutes.
    #[serde(default = "default_login_ttl")]
    pub login_token_ttl_minutes: u64,
    /// Lifetime of session tokens in hours.
    #[serde(default = "default_session_ttl")]
    pub session_token_ttl_hours: u64,
    /// Random bytes per token before hex encoding.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
}

impl AuthConfig {
    /// Login token lifetime. Saturates instead of overflowing.
    pub fn login_token_ttl(&self) -> Duration {
        Duration::from_secs(self.login_token_ttl_minutes.saturating_mul(60))
    }

    /// Session token lifetime. Saturates instead of overflowing.
    pub fn session_token_ttl(&self) -> Duration {
        Duration::from_secs(self.session_token_ttl_hours.saturating_mul(60 * 60))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_token_ttl_minutes: default_login_ttl(),
            session_token_ttl_hours: default_session_ttl(),
            token_bytes: default_token_bytes(),
        }
    }
}

fn default_login_ttl() -> u64 {
    30
}

fn default_session_ttl() -> u64 {
    24 * 7
}

fn default_token_bytes() -> usize {
    36
}
