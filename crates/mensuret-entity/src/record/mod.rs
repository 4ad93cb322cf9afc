//! Measurement records.

pub mod model;

pub use model::{CreateRecord, Record};
