/*
 * Responsibility
 * - GET /me: echo the identity context the gate attached to this request
 */
use axum::Json;

use crate::api::v1::extractors::{IdentityCtx, IdentityCtxExtractor};

pub async fn me(IdentityCtxExtractor(identity): IdentityCtxExtractor) -> Json<IdentityCtx> {
    Json(identity)
}
