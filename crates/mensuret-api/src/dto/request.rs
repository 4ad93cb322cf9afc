//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mensuret_core::error::AppError;
use mensuret_entity::record::CreateRecord;

/// Body of `POST /login/`.
///
/// Exactly one field is acted on, in the order `mail`, `token`, `session`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Address to mail a login link to.
    #[validate(length(
        min = 1,
        max = 320,
        message = "Email address must be between 1 and 320 characters"
    ))]
    pub mail: Option<String>,
    /// Login token from an emailed link.
    pub token: Option<String>,
    /// Session token to resolve.
    pub session: Option<String>,
}

/// What a login request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep<'a> {
    /// Send a login link.
    RequestLink(&'a str),
    /// Exchange a login token for a session token.
    Redeem(&'a str),
    /// Resolve a session token to its owner.
    Resolve(&'a str),
}

impl LoginRequest {
    /// The step selected by the first present field.
    pub fn step(&self) -> Option<LoginStep<'_>> {
        if let Some(mail) = &self.mail {
            Some(LoginStep::RequestLink(mail))
        } else if let Some(token) = &self.token {
            Some(LoginStep::Redeem(token))
        } else {
            self.session.as_deref().map(LoginStep::Resolve)
        }
    }
}

/// Body of `POST /logout/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Session token to discard.
    pub session: Option<String>,
}

/// Body of `POST /api/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Session token.
    pub token: Option<String>,
    /// One of `r`, `c`, `u`, `d`.
    pub action: Option<String>,
    /// Record id for `u` and `d`.
    pub id: Option<String>,
    /// Series name for `c`.
    pub name: Option<String>,
    /// Milliseconds since the Unix epoch for `c`.
    pub time: Option<i64>,
    /// Measured value for `c` and `u`.
    pub value: Option<f64>,
}

/// A fully validated record operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordAction {
    /// List the caller's records.
    Read,
    /// Insert a record.
    Create(CreateRecord),
    /// Change a record's value.
    Update { id: String, value: f64 },
    /// Remove a record.
    Delete { id: String },
}

impl TryFrom<ApiRequest> for RecordAction {
    type Error = AppError;

    fn try_from(req: ApiRequest) -> Result<Self, Self::Error> {
        let action = req
            .action
            .ok_or_else(|| AppError::validation("Missing field: action"))?;

        match action.as_str() {
            "r" => Ok(Self::Read),
            "c" => Ok(Self::Create(CreateRecord {
                name: required(req.name, "name")?,
                time: required(req.time, "time")?,
                value: required(req.value, "value")?,
            })),
            "u" => Ok(Self::Update {
                id: required(req.id, "id")?,
                value: required(req.value, "value")?,
            }),
            "d" => Ok(Self::Delete {
                id: required(req.id, "id")?,
            }),
            other => Err(AppError::validation(format!("Unknown action: {other}"))),
        }
    }
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, AppError> {
    field.ok_or_else(|| AppError::validation(format!("Missing field: {name}")))
}
