//! # mensuret-auth
//!
//! Passwordless authentication for Mensuret.
//!
//! ## Modules
//!
//! - `token`: in-memory token stores with per-tier expiry and one live token per owner
//! - `session`: the login flow tying the login tier and the session tier together

pub mod session;
pub mod token;

pub use session::{SessionGrant, SessionManager};
pub use token::{Clock, ManualClock, SystemClock, TokenError, TokenStore, TokenTier};
