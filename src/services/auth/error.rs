/*
 * Responsibility
 * - Outcomes of the request gate that terminate a request
 * - HTTP mapping lives in crate::error (one fixed status per variant)
 */
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token provided")]
    NoToken,
    #[error("invalid token format")]
    InvalidTokenFormat,
    #[error("invalid token payload")]
    InvalidTokenPayload,
    #[error("invalid token claims")]
    InvalidTokenClaims,
    #[error("missing user id in token")]
    MissingSubject,
    #[error("invalid token: {0}")]
    VerificationFailed(String),
    #[error("error fetching user details: {0}")]
    UserFetchFailed(String),
    #[error("user is banned")]
    UserBanned,
}
