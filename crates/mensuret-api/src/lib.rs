//! # mensuret-api
//!
//! HTTP API layer for Mensuret built on Axum.
//!
//! Provides the passwordless login endpoints, the record API, the static
//! client fallback, middleware, extractors, DTOs and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
