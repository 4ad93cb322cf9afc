//! Embedded schema migrations.

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use tracing::info;

use mensuret_core::error::{AppError, ErrorKind};

/// Migrations compiled from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the record schema up to date. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    info!(
        known_migrations = MIGRATOR.iter().count(),
        "Applying record schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Record schema is up to date");
    Ok(())
}
