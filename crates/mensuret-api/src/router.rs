//! Route definitions for the Mensuret HTTP API.
//!
//! Every endpoint answers with and without a trailing slash. Anything not
//! routed falls through to the static client, with `index.html` as the
//! single-page fallback.

use std::path::Path;

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request logger.
pub fn build_router(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.server.static_dir);
    let client = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(auth_routes())
        .merge(record_routes())
        .merge(health_routes())
        .fallback_service(client)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login and logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/login/", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/logout/", post(handlers::auth::logout))
}

/// Record API (session token in the body)
fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/api", post(handlers::records::dispatch))
        .route("/api/", post(handlers::records::dispatch))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
