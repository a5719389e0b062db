//! Identity provider contract consumed by the request gate.
//!
//! The gate only knows two operations: verify a session token and fetch the
//! user record for a subject. Everything vendor specific lives behind this trait.
use async_trait::async_trait;
use thiserror::Error;

/// Claims produced by a successful cryptographic verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub subject: String,
    pub issued_at: Option<i64>,
}

/// The identity provider's view of a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecord {
    pub banned: bool,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
    pub username: Option<String>,
    pub email_addresses: Vec<String>,
}

/// Verification failures.
///
/// `IssuedInFuture` is the only condition the gate tolerates (clock skew between
/// this host and the provider). Everything else is a hard rejection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("token was issued in the future (iat={iat}, now={now})")]
    IssuedInFuture { iat: i64, now: i64 },
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct UserFetchError(pub String);

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    // Verify signature and time claims of a raw session token.
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError>;

    // Fetch the current user record for a verified subject.
    async fn get_user(&self, subject: &str) -> Result<UserRecord, UserFetchError>;
}
