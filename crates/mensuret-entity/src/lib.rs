//! # mensuret-entity
//!
//! Domain entity models for Mensuret. Database rows derive `sqlx::FromRow`
//! and serialize to the JSON shape the client expects.

pub mod record;
