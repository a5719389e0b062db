/*
 * Responsibility
 * - POST /advice: structured profile → advisory text
 * - POST /analyze: free-form JSON object → analysis text
 * - DTO validation here; template/generation logic lives in services::advisory
 */
use axum::{Json, extract::State};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    api::v1::{
        dto::advisory::{AdviceRequest, AdvisoryResponse},
        extractors::{IdentityCtxExtractor, JsonBody},
    },
    error::AppError,
    state::AppState,
};

pub async fn advise(
    State(state): State<AppState>,
    IdentityCtxExtractor(identity): IdentityCtxExtractor,
    JsonBody(req): JsonBody<AdviceRequest>,
) -> Result<Json<AdvisoryResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("BAD_REQUEST", msg))?;

    info!(
        user_id = %identity.user_id,
        verified = identity.is_verified(),
        query_type = req.query_type.as_deref().unwrap_or("default"),
        "structured advice requested"
    );

    let response = state.advisory.advise(&req.into_profile()).await?;

    Ok(Json(AdvisoryResponse { response }))
}

pub async fn analyze(
    State(state): State<AppState>,
    IdentityCtxExtractor(identity): IdentityCtxExtractor,
    JsonBody(payload): JsonBody<Map<String, Value>>,
) -> Result<Json<AdvisoryResponse>, AppError> {
    info!(
        user_id = %identity.user_id,
        verified = identity.is_verified(),
        fields = payload.len(),
        "portfolio analysis requested"
    );

    let response = state.advisory.analyze(&payload).await?;

    Ok(Json(AdvisoryResponse { response }))
}
