//! Trait definitions for pluggable backends.

pub mod mailer;

pub use mailer::{LoginMailer, LoginMessage};
