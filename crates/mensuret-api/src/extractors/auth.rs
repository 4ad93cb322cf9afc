//! `SessionUser` extractor: reads the `/api/` body and verifies its session token.

use axum::extract::{FromRequest, Request};

use mensuret_core::error::AppError;

use crate::dto::request::ApiRequest;
use crate::error::ApiError;
use crate::extractors::json::ApiJson;
use crate::state::AppState;

/// Authenticated caller of the record API together with the rest of the body.
///
/// The session token travels in the JSON body rather than a header, so this
/// extractor consumes the body and must be the last handler argument.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// Identity the session token resolved to.
    pub owner: String,
    /// The parsed request body.
    pub request: ApiRequest,
}

impl FromRequest<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let ApiJson(request) = ApiJson::<ApiRequest>::from_request(req, state).await?;

        let token = request
            .token
            .as_deref()
            .ok_or_else(|| AppError::authentication("Missing session token"))?;

        let owner = state.sessions.verify_session(token).await?;

        Ok(Self { owner, request })
    }
}
