use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

use super::IdentityCtx;

/// Extractor handing the gate's IdentityCtx to a handler.
/// Assumes the identity middleware already inserted it into request.extensions().
/// Missing means the route is not behind the gate: respond 401.
pub struct IdentityCtxExtractor(pub IdentityCtx);

impl FromRequestParts<AppState> for IdentityCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityCtx>()
            .cloned()
            .map(IdentityCtxExtractor)
            .ok_or_else(|| AuthError::NoToken.into())
    }
}
