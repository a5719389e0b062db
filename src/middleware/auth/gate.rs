//! Request gate: bearer token → IdentityCtx (or a terminal AuthError).
//!
//! Branches:
//! - verified token: fetch the user record, reject banned users (403)
//! - `iat` in the future (clock skew): read `sub` from the unverified payload,
//!   skip the user fetch and ban check, fill the context with defaults
//! - any other verification failure: 401 with the verifier's detail
//!
//! The skew branch is a deliberate trust downgrade. It skips the ban check and
//! is logged at `warn` every time it is taken.
use tracing::{debug, warn};

use crate::api::v1::extractors::IdentityCtx;
use crate::services::auth::{AuthError, IdentityProvider, VerifyError, unverified};

const BEARER_PREFIX: &str = "Bearer ";

/// Strip the `Bearer ` prefix; anything else (or nothing) is `NoToken`.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, AuthError> {
    let token = authorization
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AuthError::NoToken);
    }
    Ok(token)
}

// Enough of the token to correlate logs, never the whole credential.
fn token_prefix(token: &str) -> &str {
    match token.char_indices().nth(20) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[tracing::instrument(skip_all, fields(user_id = tracing::field::Empty))]
pub async fn authorize(
    provider: &dyn IdentityProvider,
    authorization: Option<&str>,
) -> Result<IdentityCtx, AuthError> {
    debug!(
        header_present = authorization.is_some(),
        "authorization header"
    );

    let token = extract_bearer(authorization).inspect_err(|_| {
        debug!("no bearer token provided");
    })?;

    debug!(token_prefix = %token_prefix(token), "bearer token extracted");

    match provider.verify(token).await {
        Ok(claims) => {
            let user_id = claims.subject.clone();
            tracing::Span::current().record("user_id", user_id.as_str());

            let user = provider.get_user(&user_id).await.map_err(|e| {
                warn!(error = %e, "user lookup failed");
                AuthError::UserFetchFailed(e.to_string())
            })?;

            if user.banned {
                warn!("banned user rejected");
                return Err(AuthError::UserBanned);
            }

            debug!(issued_at = ?claims.issued_at, "identity verified");
            Ok(IdentityCtx::verified(user_id, user))
        }
        Err(VerifyError::IssuedInFuture { iat, now }) => {
            warn!(
                iat,
                now,
                skew_seconds = iat - now,
                "token issued in the future; accepting unverified subject (clock skew bypass)"
            );

            let user_id = unverified::subject_from_unverified(token).inspect_err(|e| {
                warn!(error = %e, "clock skew bypass: token payload unusable");
            })?;
            tracing::Span::current().record("user_id", user_id.as_str());

            warn!("clock skew bypass: user lookup and ban check skipped");
            Ok(IdentityCtx::unverified(user_id))
        }
        Err(VerifyError::Rejected(detail)) => {
            warn!(error = %detail, "token verification failed");
            Err(AuthError::VerificationFailed(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::v1::extractors::TrustLevel;
    use crate::services::auth::UserRecord;
    use crate::services::auth::testing::{FakeIdentityProvider, sample_user, unsigned_token};

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer(None), Err(AuthError::NoToken));
        assert_eq!(extract_bearer(Some("")), Err(AuthError::NoToken));
        assert_eq!(extract_bearer(Some("Bearer ")), Err(AuthError::NoToken));
        assert_eq!(extract_bearer(Some("Bearer    ")), Err(AuthError::NoToken));
        assert_eq!(extract_bearer(Some("Basic dXNlcjpwdw==")), Err(AuthError::NoToken));
        assert_eq!(extract_bearer(Some("abc.def.ghi")), Err(AuthError::NoToken));
    }

    #[test]
    fn token_prefix_is_bounded() {
        assert_eq!(token_prefix("short"), "short");
        assert_eq!(token_prefix(&"x".repeat(64)).len(), 20);
    }

    #[tokio::test]
    async fn malformed_headers_never_reach_the_provider() {
        let provider = FakeIdentityProvider::verified("user_1", sample_user());

        for header in [None, Some(""), Some("Bearer "), Some("Token abc"), Some("abc")] {
            let err = authorize(&provider, header)
                .await
                .expect_err("should reject");
            assert_eq!(err, AuthError::NoToken, "header {header:?}");
        }
        assert_eq!(provider.verify_calls(), 0);
        assert_eq!(provider.user_calls(), 0);
    }

    #[tokio::test]
    async fn verified_token_populates_context_from_user_record() {
        let provider = FakeIdentityProvider::verified("user_1", sample_user());

        let ctx = authorize(&provider, Some("Bearer a.b.c"))
            .await
            .expect("should allow");

        assert_eq!(
            ctx,
            IdentityCtx {
                user_id: "user_1".into(),
                banned: false,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                user_image: "https://img.example/ada.png".into(),
                username: "ada".into(),
                user_email: "ada@example.com".into(),
                trust: TrustLevel::Verified,
            }
        );
        assert_eq!(provider.verify_calls(), 1);
        assert_eq!(provider.user_calls(), 1);
    }

    #[tokio::test]
    async fn verified_user_without_username_or_email_gets_empty_fields() {
        let user = UserRecord {
            username: None,
            email_addresses: vec![],
            ..sample_user()
        };
        let provider = FakeIdentityProvider::verified("user_2", user);

        let ctx = authorize(&provider, Some("Bearer a.b.c"))
            .await
            .expect("should allow");
        assert_eq!(ctx.username, "");
        assert_eq!(ctx.user_email, "");
        assert!(ctx.is_verified());
    }

    #[tokio::test]
    async fn banned_user_is_forbidden_regardless_of_other_fields() {
        let users = [
            UserRecord {
                banned: true,
                ..sample_user()
            },
            UserRecord {
                banned: true,
                ..UserRecord::default()
            },
        ];
        for user in users {
            let provider = FakeIdentityProvider::verified("user_1", user);
            let err = authorize(&provider, Some("Bearer a.b.c"))
                .await
                .expect_err("should reject");
            assert_eq!(err, AuthError::UserBanned);
        }
    }

    #[tokio::test]
    async fn user_fetch_failure_is_internal() {
        let provider =
            FakeIdentityProvider::verified("user_1", sample_user()).with_user_error("timeout");

        let err = authorize(&provider, Some("Bearer a.b.c"))
            .await
            .expect_err("should reject");
        assert_eq!(err, AuthError::UserFetchFailed("timeout".into()));
    }

    #[tokio::test]
    async fn non_skew_failure_is_unauthorized_with_detail_and_no_further_calls() {
        let provider = FakeIdentityProvider::rejecting("token is expired");

        let err = authorize(&provider, Some("Bearer a.b.c"))
            .await
            .expect_err("should reject");
        assert_eq!(
            err,
            AuthError::VerificationFailed("token is expired".into())
        );
        assert_eq!(provider.verify_calls(), 1);
        assert_eq!(provider.user_calls(), 0);
    }

    #[tokio::test]
    async fn skew_failure_uses_unverified_subject_and_skips_user_fetch() {
        let provider = FakeIdentityProvider::skewed();
        let token = unsigned_token(&json!({"sub": "user_skewed", "iat": 1_700_000_030}));

        let ctx = authorize(&provider, Some(&format!("Bearer {token}")))
            .await
            .expect("should allow");

        assert_eq!(ctx, IdentityCtx::unverified("user_skewed".into()));
        assert_eq!(ctx.user_id, "user_skewed");
        assert!(!ctx.banned);
        for field in [
            &ctx.first_name,
            &ctx.last_name,
            &ctx.user_image,
            &ctx.username,
            &ctx.user_email,
        ] {
            assert!(field.is_empty());
        }
        assert_eq!(ctx.trust, TrustLevel::UnverifiedClockSkew);
        assert_eq!(provider.user_calls(), 0);
    }

    #[tokio::test]
    async fn skew_failure_with_unusable_payload_is_unauthorized() {
        use base64::Engine as _;
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let cases = [
            ("opaque-token".to_string(), AuthError::InvalidTokenFormat),
            ("h.%%%.s".to_string(), AuthError::InvalidTokenPayload),
            (
                format!("h.{}.s", URL_SAFE_NO_PAD.encode("\"just a string\"")),
                AuthError::InvalidTokenClaims,
            ),
            (
                unsigned_token(&json!({"sub": 123})),
                AuthError::MissingSubject,
            ),
            (unsigned_token(&json!({"iat": 1})), AuthError::MissingSubject),
        ];

        for (token, expected) in cases {
            let provider = FakeIdentityProvider::skewed();
            let err = authorize(&provider, Some(&format!("Bearer {token}")))
                .await
                .expect_err("should reject");
            assert_eq!(err, expected, "token {token}");
            assert_eq!(provider.user_calls(), 0);
        }
    }
}
