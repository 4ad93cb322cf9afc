//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mensuret_auth::SessionManager;
use mensuret_core::config::AppConfig;
use mensuret_database::RecordRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Login and session token tiers plus the mailer.
    pub sessions: Arc<SessionManager>,
    /// Record repository.
    pub records: Arc<RecordRepository>,
}

impl AppState {
    /// Bundle the shared dependencies.
    pub fn new(
        config: AppConfig,
        sessions: Arc<SessionManager>,
        records: Arc<RecordRepository>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            records,
        }
    }
}
