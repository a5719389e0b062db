//! Clerk-backed identity provider: networkless JWT verification plus
//! backend API user lookups.
use async_trait::async_trait;

pub mod jwt;
pub mod users;

pub use jwt::JwtVerifier;
pub use users::ClerkUserClient;

use crate::services::auth::provider::{
    Claims, IdentityProvider, UserFetchError, UserRecord, VerifyError,
};

#[derive(Debug, Clone)]
pub struct ClerkIdentityProvider {
    verifier: JwtVerifier,
    users: ClerkUserClient,
}

impl ClerkIdentityProvider {
    pub fn new(verifier: JwtVerifier, users: ClerkUserClient) -> Self {
        Self { verifier, users }
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentityProvider {
    async fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        self.verifier.verify(token)
    }

    async fn get_user(&self, subject: &str) -> Result<UserRecord, UserFetchError> {
        self.users.get_user(subject).await
    }
}
