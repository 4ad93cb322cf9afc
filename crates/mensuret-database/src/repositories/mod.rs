//! Repository implementations for Mensuret entities.

pub mod record;

pub use record::RecordRepository;
