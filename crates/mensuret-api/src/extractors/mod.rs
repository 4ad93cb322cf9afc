//! Custom Axum extractors.

pub mod auth;
pub mod json;

pub use auth::SessionUser;
pub use json::ApiJson;
