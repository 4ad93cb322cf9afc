//! Convenience result type alias for Mensuret.

use crate::error::AppError;

/// A specialized `Result` type for Mensuret operations.
pub type AppResult<T> = Result<T, AppError>;
