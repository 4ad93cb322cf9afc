//! In-memory token store for one authentication tier.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::clock::Clock;
use super::value::random_token;

/// Which tier a store serves. Used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenTier {
    /// Short-lived tokens delivered by mail.
    Login,
    /// Long-lived bearer tokens returned after redemption.
    Session,
}

impl std::fmt::Display for TokenTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenTier::Login => write!(f, "login"),
            TokenTier::Session => write!(f, "session"),
        }
    }
}

/// Why a token failed verification.
///
/// Callers treat both variants as "not authenticated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token was never issued, or was already invalidated.
    #[error("token is unknown")]
    Unknown,
    /// The token existed but its lifetime elapsed. It has now been removed.
    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Clone)]
struct TokenEntry {
    owner: String,
    issued_at: DateTime<Utc>,
}

/// Internal state guarded by the store mutex.
#[derive(Debug, Default)]
struct InnerState {
    /// Token value -> owner and issue time.
    tokens: HashMap<String, TokenEntry>,
    /// Owners that may still hold a live token. A hint only: the owner's
    /// token may have expired without anyone looking at it yet.
    known_owners: HashSet<String>,
}

impl InnerState {
    fn remove(&mut self, token: &str) -> Option<TokenEntry> {
        let entry = self.tokens.remove(token)?;
        self.known_owners.remove(&entry.owner);
        Some(entry)
    }
}

/// Bearer tokens for one tier, at most one live token per owner.
///
/// Every operation runs under a single Tokio mutex, so the check-then-write
/// sequences in [`generate_token`](Self::generate_token),
/// [`verify_token`](Self::verify_token) and
/// [`redeem_token`](Self::redeem_token) are atomic. Expired entries are
/// reclaimed lazily whenever an operation looks at them; there is no sweep.
#[derive(Debug)]
pub struct TokenStore {
    tier: TokenTier,
    ttl: Duration,
    token_bytes: usize,
    clock: Arc<dyn Clock>,
    state: Mutex<InnerState>,
}

impl TokenStore {
    /// Creates an empty store whose tokens live for `ttl`.
    pub fn new(
        tier: TokenTier,
        ttl: std::time::Duration,
        token_bytes: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            tier,
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            token_bytes,
            clock,
            state: Mutex::new(InnerState::default()),
        }
    }

    /// Lifetime of every token in this store.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a live token for `owner`, issuing one if needed.
    ///
    /// If the owner already holds an unexpired token, that same value is
    /// returned. Expired tokens found on the way are removed.
    pub async fn generate_token(&self, owner: &str) -> String {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        if state.known_owners.contains(owner) {
            let candidates: Vec<String> = state
                .tokens
                .iter()
                .filter(|(_, entry)| entry.owner == owner)
                .map(|(token, _)| token.clone())
                .collect();

            for token in candidates {
                let live = state
                    .tokens
                    .get(&token)
                    .is_some_and(|entry| self.is_live(entry, now));

                if live {
                    debug!(tier = %self.tier, owner = %owner, "Reusing live token");
                    return token;
                }

                state.remove(&token);
                debug!(tier = %self.tier, owner = %owner, "Reclaimed expired token");
            }
        }

        let token = loop {
            let candidate = random_token(self.token_bytes);
            if !state.tokens.contains_key(&candidate) {
                break candidate;
            }
        };

        state.tokens.insert(
            token.clone(),
            TokenEntry {
                owner: owner.to_string(),
                issued_at: now,
            },
        );
        state.known_owners.insert(owner.to_string());

        debug!(
            tier = %self.tier,
            owner = %owner,
            live_tokens = state.tokens.len(),
            "Issued token"
        );

        token
    }

    /// Resolves `token` to its owner.
    ///
    /// A token is valid strictly before `issued_at + ttl`. An expired token
    /// is deleted as a side effect. Verification never extends a lifetime.
    pub async fn verify_token(&self, token: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let (owner, live) = match state.tokens.get(token) {
            Some(entry) => (entry.owner.clone(), self.is_live(entry, now)),
            None => return Err(TokenError::Unknown),
        };

        if !live {
            state.remove(token);
            debug!(tier = %self.tier, owner = %owner, "Token expired");
            return Err(TokenError::Expired);
        }

        Ok(owner)
    }

    /// Resolves `token` to its owner and removes it in the same step.
    ///
    /// Of any number of concurrent redemptions of one value, at most one
    /// succeeds. Expired tokens are removed and reported as expired.
    pub async fn redeem_token(&self, token: &str) -> Result<String, TokenError> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;

        let entry = state.remove(token).ok_or(TokenError::Unknown)?;

        if !self.is_live(&entry, now) {
            debug!(tier = %self.tier, owner = %entry.owner, "Token expired");
            return Err(TokenError::Expired);
        }

        debug!(tier = %self.tier, owner = %entry.owner, "Token redeemed");
        Ok(entry.owner)
    }

    /// Removes `token`. Unknown tokens are ignored.
    pub async fn invalidate_token(&self, token: &str) {
        let mut state = self.state.lock().await;

        if let Some(entry) = state.remove(token) {
            debug!(tier = %self.tier, owner = %entry.owner, "Token invalidated");
        }
    }

    /// Whether `token` is currently stored, expired or not.
    pub async fn contains(&self, token: &str) -> bool {
        self.state.lock().await.tokens.contains_key(token)
    }

    /// Number of stored tokens, including expired ones not yet reclaimed.
    pub async fn len(&self) -> usize {
        self.state.lock().await.tokens.len()
    }

    /// Whether the store holds no tokens.
    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.tokens.is_empty()
    }

    fn is_live(&self, entry: &TokenEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.issued_at) < self.ttl
    }
}
