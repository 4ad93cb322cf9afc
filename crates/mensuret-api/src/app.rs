//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use mensuret_auth::{SessionManager, SystemClock};
use mensuret_core::config::AppConfig;
use mensuret_core::error::AppError;
use mensuret_database::connection::DatabasePool;
use mensuret_database::migration::run_migrations;
use mensuret_database::RecordRepository;
use mensuret_mail::build_mailer;

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(request_timeout_layer(server.request_timeout_seconds))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// Aborts requests that run longer than `seconds` with `408 Request Timeout`.
fn request_timeout_layer(seconds: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(seconds))
}

/// Runs the Mensuret server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Mensuret server...");

    // ── Step 1: Database ─────────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;
    let records = Arc::new(RecordRepository::new(db.pool().clone()));

    // ── Step 2: Mailer and token tiers ───────────────────────────
    let mailer = build_mailer(&config.mail)?;
    let sessions = Arc::new(SessionManager::from_config(
        &config.auth,
        Arc::new(SystemClock),
        mailer,
    ));

    tracing::info!(
        login_ttl_minutes = config.auth.login_token_ttl_minutes,
        session_ttl_hours = config.auth.session_token_ttl_hours,
        "Token stores initialized"
    );

    // ── Step 3: HTTP server ──────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(AppState::new(config, sessions, records));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Mensuret server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("Mensuret server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
