/*
 * Responsibility
 * - JSON request body extractor for the v1 handlers
 * - Any Json rejection (syntax, missing field, wrong type, content type)
 *   becomes AppError BAD_REQUEST so the error envelope stays uniform
 */
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(status = %rejection.status(), "request body rejected");
            AppError::bad_request("BAD_REQUEST", rejection.body_text())
        })?;
        Ok(Self(value))
    }
}
