/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status / JSON error body)
 * - Unified conversion from gate errors and advisory errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::advisory::{AdvisoryError, GenerationError};
use crate::services::auth::AuthError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{code}: {message}")]
    Unauthorized {
        code: &'static str,
        message: String,
        details: Option<String>,
    },
    #[error("{code}: {message}")]
    Forbidden { code: &'static str, message: String },
    #[error("{code}: {message}")]
    BadGateway {
        code: &'static str,
        message: String,
        details: Option<String>,
    },
    #[error("{code}: {message}")]
    Internal {
        code: &'static str,
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, details) = match self {
            AppError::BadRequest { code, message } | AppError::Forbidden { code, message } => {
                (code, message, None)
            }
            AppError::Unauthorized {
                code,
                message,
                details,
            }
            | AppError::BadGateway {
                code,
                message,
                details,
            }
            | AppError::Internal {
                code,
                message,
                details,
            } => (code, message, details),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NoToken => AppError::unauthorized("NO_TOKEN", "no token provided"),
            AuthError::InvalidTokenFormat => {
                AppError::unauthorized("INVALID_TOKEN_FORMAT", "invalid token format")
            }
            AuthError::InvalidTokenPayload => {
                AppError::unauthorized("INVALID_TOKEN_PAYLOAD", "invalid token payload")
            }
            AuthError::InvalidTokenClaims => {
                AppError::unauthorized("INVALID_TOKEN_CLAIMS", "invalid token claims")
            }
            AuthError::MissingSubject => {
                AppError::unauthorized("MISSING_SUBJECT", "missing user id in token")
            }
            AuthError::VerificationFailed(detail) => AppError::Unauthorized {
                code: "INVALID_TOKEN",
                message: "invalid token".into(),
                details: Some(detail),
            },
            AuthError::UserFetchFailed(detail) => AppError::Internal {
                code: "USER_FETCH_FAILED",
                message: "error fetching user details".into(),
                details: Some(detail),
            },
            AuthError::UserBanned => AppError::Forbidden {
                code: "USER_BANNED",
                message: "user is banned".into(),
            },
        }
    }
}

impl From<AdvisoryError> for AppError {
    fn from(e: AdvisoryError) -> Self {
        match e {
            AdvisoryError::TemplateNotFound(name) => AppError::Internal {
                code: "TEMPLATE_NOT_FOUND",
                message: "prompt template not found".into(),
                details: Some(name),
            },
            // Server-side file problem; path and io error stay in logs only
            AdvisoryError::TemplateRead { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "prompt template unreadable");
                AppError::Internal {
                    code: "INTERNAL_SERVER_ERROR",
                    message: "internal server error".into(),
                    details: None,
                }
            }
            AdvisoryError::Generation(GenerationError::Failed(detail)) => AppError::BadGateway {
                code: "GENERATION_FAILED",
                message: "failed to generate advisory".into(),
                details: Some(detail),
            },
            AdvisoryError::Generation(GenerationError::EmptyResponse) => AppError::BadGateway {
                code: "EMPTY_GENERATION_RESPONSE",
                message: "empty response from generation backend".into(),
                details: None,
            },
            // Normally caught at startup
            AdvisoryError::Generation(GenerationError::MissingApiKey) => AppError::Internal {
                code: "INTERNAL_SERVER_ERROR",
                message: "internal server error".into(),
                details: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let body = serde_json::from_slice(&bytes).expect("body should be json");
        (status, body)
    }

    #[tokio::test]
    async fn every_gate_error_has_a_fixed_status() {
        let cases = [
            (AuthError::NoToken, StatusCode::UNAUTHORIZED, "NO_TOKEN"),
            (
                AuthError::InvalidTokenFormat,
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN_FORMAT",
            ),
            (
                AuthError::InvalidTokenPayload,
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN_PAYLOAD",
            ),
            (
                AuthError::InvalidTokenClaims,
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN_CLAIMS",
            ),
            (
                AuthError::MissingSubject,
                StatusCode::UNAUTHORIZED,
                "MISSING_SUBJECT",
            ),
            (
                AuthError::VerificationFailed("expired".into()),
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
            ),
            (
                AuthError::UserFetchFailed("timeout".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_FETCH_FAILED",
            ),
            (AuthError::UserBanned, StatusCode::FORBIDDEN, "USER_BANNED"),
        ];

        for (err, status, code) in cases {
            let (got_status, body) = render(err.into()).await;
            assert_eq!(got_status, status, "{code}");
            assert_eq!(body["error"]["code"], code);
            assert!(body["error"]["message"].is_string());
        }
    }

    #[tokio::test]
    async fn verification_failure_carries_the_underlying_detail() {
        let (_, body) = render(AuthError::VerificationFailed("ExpiredSignature".into()).into()).await;
        assert_eq!(body["error"]["details"], "ExpiredSignature");
    }

    #[tokio::test]
    async fn banned_response_has_no_details() {
        let (_, body) = render(AuthError::UserBanned.into()).await;
        assert!(body["error"].get("details").is_none());
        assert_eq!(body["error"]["message"], "user is banned");
    }

    #[tokio::test]
    async fn advisory_errors_map_to_service_errors() {
        let (status, body) =
            render(AdvisoryError::TemplateNotFound("prompt.txt".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "TEMPLATE_NOT_FOUND");
        assert_eq!(body["error"]["details"], "prompt.txt");

        let (status, body) =
            render(AdvisoryError::from(GenerationError::Failed("refused".into())).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");

        let (status, body) =
            render(AdvisoryError::from(GenerationError::EmptyResponse).into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "EMPTY_GENERATION_RESPONSE");
    }
}
