//! In-memory identity provider for gate and router tests.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::services::auth::provider::{
    Claims, IdentityProvider, UserFetchError, UserRecord, VerifyError,
};

/// Build a compact token with a real JSON payload and a garbage signature.
pub fn unsigned_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

pub fn sample_user() -> UserRecord {
    UserRecord {
        banned: false,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        image_url: "https://img.example/ada.png".into(),
        username: Some("ada".into()),
        email_addresses: vec!["ada@example.com".into(), "alt@example.com".into()],
    }
}

pub struct FakeIdentityProvider {
    verify_result: Result<Claims, VerifyError>,
    user_result: Result<UserRecord, UserFetchError>,
    verify_calls: AtomicUsize,
    user_calls: AtomicUsize,
}

impl FakeIdentityProvider {
    pub fn verified(subject: &str, user: UserRecord) -> Self {
        Self {
            verify_result: Ok(Claims {
                subject: subject.to_string(),
                issued_at: Some(1_700_000_000),
            }),
            user_result: Ok(user),
            verify_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    pub fn skewed() -> Self {
        Self::failing(VerifyError::IssuedInFuture {
            iat: 1_700_000_030,
            now: 1_700_000_000,
        })
    }

    pub fn rejecting(detail: &str) -> Self {
        Self::failing(VerifyError::Rejected(detail.to_string()))
    }

    pub fn with_user_error(mut self, detail: &str) -> Self {
        self.user_result = Err(UserFetchError(detail.to_string()));
        self
    }

    fn failing(err: VerifyError) -> Self {
        Self {
            verify_result: Err(err),
            user_result: Ok(sample_user()),
            verify_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
        }
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn verify(&self, _token: &str) -> Result<Claims, VerifyError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        self.verify_result.clone()
    }

    async fn get_user(&self, _subject: &str) -> Result<UserRecord, UserFetchError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user_result.clone()
    }
}
