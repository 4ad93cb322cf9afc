//! Login flow handlers: request a link, redeem it, resolve a session, log out.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use validator::Validate;

use mensuret_auth::session::base_url_from_host;
use mensuret_core::error::AppError;

use crate::dto::request::{LoginRequest, LoginStep, LogoutRequest};
use crate::dto::response::{EmptyResponse, LoginResponse};
use crate::error::ApiResult;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /login/
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let step = req
        .step()
        .ok_or_else(|| AppError::validation("Expected one of: mail, token, session"))?;

    let response = match step {
        LoginStep::RequestLink(address) => {
            let base_url = link_base_url(&state, &headers)?;
            state.sessions.request_login(address, &base_url).await?;
            LoginResponse::default()
        }
        LoginStep::Redeem(token) => {
            let grant = state.sessions.redeem_login(token).await?;
            LoginResponse {
                token: Some(grant.token),
                ..LoginResponse::default()
            }
        }
        LoginStep::Resolve(session) => {
            let owner = state.sessions.verify_session(session).await?;
            LoginResponse {
                user: Some(owner),
                ..LoginResponse::default()
            }
        }
    };

    Ok(Json(response))
}

/// POST /logout/
pub async fn logout(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LogoutRequest>,
) -> ApiResult<Json<EmptyResponse>> {
    let session = req
        .session
        .ok_or_else(|| AppError::validation("Missing field: session"))?;

    state.sessions.logout(&session).await;

    Ok(Json(EmptyResponse {}))
}

/// Base URL of the emailed link: configured public URL, else the `Host` header.
fn link_base_url(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(url) = state
        .config
        .server
        .public_url
        .as_deref()
        .filter(|u| !u.is_empty())
    {
        return Ok(url.trim_end_matches('/').to_string());
    }

    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .map(base_url_from_host)
        .ok_or_else(|| AppError::validation("Missing Host header"))
}
