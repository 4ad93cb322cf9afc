//! # mensuret-core
//!
//! Core crate for Mensuret. Contains configuration schemas, the login
//! mailer trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Mensuret crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
