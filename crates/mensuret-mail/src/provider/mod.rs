//! Mailer implementations.

pub mod http;
pub mod log;
pub mod smtp;
