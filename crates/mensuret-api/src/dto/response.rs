//! Response DTOs.
//!
//! Absent fields are omitted, so an acknowledgement serializes as `{}`.

use serde::{Deserialize, Serialize};

use mensuret_entity::record::Record;

/// Response of `POST /login/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token issued on redemption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Owner of a resolved session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Response of `POST /api/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// Records listed by the `r` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
}

/// Empty acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyResponse {}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
}
