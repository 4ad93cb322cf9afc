//! Passwordless login flow.

pub mod link;
pub mod manager;

pub use link::{base_url_from_host, login_link};
pub use manager::{SessionGrant, SessionManager};
