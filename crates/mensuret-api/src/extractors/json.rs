//! JSON body extractor that rejects with the API error body.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use mensuret_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::Json`], but malformed bodies produce a `400` with
/// `{"error": "VALIDATION_ERROR", "message": ..}`.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(AppError::validation(rejection.body_text())))?;

        Ok(Self(value))
    }
}
