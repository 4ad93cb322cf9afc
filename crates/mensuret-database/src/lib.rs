//! # mensuret-database
//!
//! SQLite connection management, the embedded migration runner and the
//! record repository.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::RecordRepository;
