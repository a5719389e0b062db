//! Subject extraction from a token whose signature was NOT verified.
//!
//! Only reachable from the clock-skew branch of the gate. Nothing here checks
//! the signature; callers must treat the result as an untrusted identity.
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

use crate::services::auth::error::AuthError;

/// Read `sub` from the payload segment of a compact `header.payload.signature` token.
pub fn subject_from_unverified(token: &str) -> Result<String, AuthError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(AuthError::InvalidTokenFormat);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::InvalidTokenPayload)?;

    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::InvalidTokenClaims)?;

    match claims.get("sub") {
        Some(Value::String(sub)) if !sub.is_empty() => Ok(sub.clone()),
        _ => Err(AuthError::MissingSubject),
    }
}
