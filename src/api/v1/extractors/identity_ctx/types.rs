/*
 * Responsibility
 * - The authenticated identity as seen by handlers
 * - Built once by the gate middleware, stored in request extensions, never mutated
 *
 * Notes
 * - Token verification and user lookup belong to middleware/services
 * - Fields are always populated: real values on the verified path, explicit
 *   defaults on the clock-skew path
 */
use serde::Serialize;

use crate::services::auth::UserRecord;

/// How much the identity can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Signature verified and user record fetched (ban check applied).
    Verified,
    /// Subject read from an unverified payload after an `iat` clock-skew failure.
    /// No ban check was performed.
    UnverifiedClockSkew,
}

/// Context attached to every request that passed the gate.
///
/// - `username` / `user_email` are empty when the provider has none
/// - `user_email` is the first address on the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityCtx {
    pub user_id: String,
    pub banned: bool,
    pub first_name: String,
    pub last_name: String,
    pub user_image: String,
    pub username: String,
    pub user_email: String,
    pub trust: TrustLevel,
}

impl IdentityCtx {
    pub fn verified(user_id: String, user: UserRecord) -> Self {
        Self {
            user_id,
            banned: user.banned,
            first_name: user.first_name,
            last_name: user.last_name,
            user_image: user.image_url,
            username: user.username.unwrap_or_default(),
            user_email: user.email_addresses.into_iter().next().unwrap_or_default(),
            trust: TrustLevel::Verified,
        }
    }

    pub fn unverified(user_id: String) -> Self {
        Self {
            user_id,
            banned: false,
            first_name: String::new(),
            last_name: String::new(),
            user_image: String::new(),
            username: String::new(),
            user_email: String::new(),
            trust: TrustLevel::UnverifiedClockSkew,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self.trust, TrustLevel::Verified)
    }
}
