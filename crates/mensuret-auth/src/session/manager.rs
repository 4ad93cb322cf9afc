//! Login flow: request a link, redeem it for a session, verify, log out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use mensuret_core::config::AuthConfig;
use mensuret_core::error::{AppError, ErrorKind};
use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::{LoginMailer, LoginMessage};

use crate::token::{Clock, TokenStore, TokenTier};

use super::link::login_link;

/// Result of redeeming a login token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    /// Bearer token for subsequent protected calls.
    pub token: String,
    /// Identity the session authenticates.
    pub owner: String,
}

/// Ties the login tier and the session tier together.
///
/// Per identity the caller moves from anonymous, to holding an emailed
/// login link, to holding a session token. Each step is an independent
/// operation connected to the next only by the token value.
#[derive(Clone)]
pub struct SessionManager {
    /// Short-lived tokens sent by mail.
    login_tokens: Arc<TokenStore>,
    /// Long-lived bearer tokens.
    session_tokens: Arc<TokenStore>,
    /// Out-of-band delivery for login links.
    mailer: Arc<dyn LoginMailer>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("login_ttl", &self.login_tokens.ttl())
            .field("session_ttl", &self.session_tokens.ttl())
            .field("mailer", &self.mailer.provider_name())
            .finish()
    }
}

impl SessionManager {
    /// Creates a manager over two existing stores.
    pub fn new(
        login_tokens: Arc<TokenStore>,
        session_tokens: Arc<TokenStore>,
        mailer: Arc<dyn LoginMailer>,
    ) -> Self {
        Self {
            login_tokens,
            session_tokens,
            mailer,
        }
    }

    /// Builds both tiers from configuration, sharing one clock.
    pub fn from_config(
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
        mailer: Arc<dyn LoginMailer>,
    ) -> Self {
        let login_tokens = Arc::new(TokenStore::new(
            TokenTier::Login,
            config.login_token_ttl(),
            config.token_bytes,
            Arc::clone(&clock),
        ));
        let session_tokens = Arc::new(TokenStore::new(
            TokenTier::Session,
            config.session_token_ttl(),
            config.token_bytes,
            clock,
        ));

        Self::new(login_tokens, session_tokens, mailer)
    }

    /// Login tier, read access for diagnostics.
    pub fn login_tokens(&self) -> &TokenStore {
        &self.login_tokens
    }

    /// Session tier, read access for diagnostics.
    pub fn session_tokens(&self) -> &TokenStore {
        &self.session_tokens
    }

    /// Issues (or re-issues) a login token for `address` and mails the link.
    ///
    /// The token is committed before delivery starts. If the mailer fails the
    /// token stays redeemable and a retry reuses it; the failure is reported
    /// as an [`ErrorKind::ExternalService`] error.
    pub async fn request_login(&self, address: &str, base_url: &str) -> AppResult<()> {
        let owner = address.trim();
        if owner.is_empty() {
            return Err(AppError::validation("Email address is required"));
        }

        let token = self.login_tokens.generate_token(owner).await;

        let message = LoginMessage {
            to: owner.to_string(),
            link: login_link(base_url, &token),
            expires_in_minutes: self.login_tokens.ttl().num_minutes().max(0) as u64,
        };

        match self.mailer.send_login_link(&message).await {
            Ok(()) => {
                info!(
                    owner = %owner,
                    provider = self.mailer.provider_name(),
                    "Login link dispatched"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    owner = %owner,
                    provider = self.mailer.provider_name(),
                    error = %e,
                    "Login link delivery failed"
                );
                Err(AppError::with_source(
                    ErrorKind::ExternalService,
                    "Could not deliver the login link, please try again",
                    e,
                ))
            }
        }
    }

    /// Exchanges a login token for a session token.
    ///
    /// The login token is consumed in the same locked step that checks it,
    /// so a second redemption of the same value fails even when both race.
    pub async fn redeem_login(&self, login_token: &str) -> AppResult<SessionGrant> {
        let owner = self
            .login_tokens
            .redeem_token(login_token)
            .await
            .map_err(|reason| {
                debug!(reason = %reason, "Login token rejected");
                AppError::authentication("This login link is invalid or has expired")
            })?;

        let token = self.session_tokens.generate_token(&owner).await;

        info!(owner = %owner, "Login token redeemed, session issued");

        Ok(SessionGrant { token, owner })
    }

    /// Resolves a session token to the identity it authenticates.
    pub async fn verify_session(&self, session_token: &str) -> AppResult<String> {
        self.session_tokens
            .verify_token(session_token)
            .await
            .map_err(|reason| {
                debug!(reason = %reason, "Session token rejected");
                AppError::authentication("Session is invalid or has expired")
            })
    }

    /// Ends a session server-side. Unknown tokens are ignored.
    pub async fn logout(&self, session_token: &str) {
        self.session_tokens.invalidate_token(session_token).await;
        debug!("Session token discarded");
    }
}
