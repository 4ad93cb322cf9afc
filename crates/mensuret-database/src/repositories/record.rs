//! Record repository implementation.
//!
//! Every query is scoped to the owning identity. Updating or deleting an id
//! that does not exist, or that belongs to someone else, affects no rows and
//! is not an error.

use sqlx::SqlitePool;
use tracing::debug;

use mensuret_core::error::{AppError, ErrorKind};
use mensuret_core::result::AppResult;
use mensuret_entity::record::model::{CreateRecord, Record};

/// Repository for per-owner measurement records.
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: SqlitePool,
}

impl RecordRepository {
    /// Create a new record repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all records of `owner`, oldest first.
    pub async fn find_by_owner(&self, owner: &str) -> AppResult<Vec<Record>> {
        sqlx::query_as::<_, Record>(
            "SELECT id, name, time, value FROM records WHERE owner = ? ORDER BY time ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list records", e))
    }

    /// Insert a new record for `owner`.
    pub async fn create(&self, owner: &str, data: CreateRecord) -> AppResult<Record> {
        let record = data.into_record();

        sqlx::query("INSERT INTO records (id, owner, name, time, value) VALUES (?, ?, ?, ?, ?)")
            .bind(&record.id)
            .bind(owner)
            .bind(&record.name)
            .bind(record.time)
            .bind(record.value)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create record", e))?;

        debug!(owner = %owner, record_id = %record.id, "Record created");
        Ok(record)
    }

    /// Set the value of one of `owner`'s records. Returns whether a row changed.
    pub async fn update_value(&self, owner: &str, id: &str, value: f64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE records SET value = ? WHERE id = ? AND owner = ?")
            .bind(value)
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update record", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete one of `owner`'s records. Returns whether a row was removed.
    pub async fn delete(&self, owner: &str, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = ? AND owner = ?")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete record", e))?;

        Ok(result.rows_affected() > 0)
    }
}
