//! Bearer token storage.
//!
//! One [`TokenStore`] exists per tier. Login tokens live for minutes,
//! session tokens for days; both tiers keep at most one live token per owner.

pub mod clock;
pub mod store;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{TokenError, TokenStore, TokenTier};
