use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

use crate::services::auth::provider::{Claims, VerifyError};

// Errors raised while building the verifier (startup only).
#[derive(Debug)]
pub enum JwtVerifierError {
    InvalidKey(jsonwebtoken::errors::Error),
}

impl fmt::Display for JwtVerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(e) => write!(f, "invalid session token public key pem: {}", e),
        }
    }
}

impl StdError for JwtVerifierError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::InvalidKey(e) => Some(e),
        }
    }
}

/// Session token claims as issued by the identity provider.
///
/// NOTE:
/// - `exp` / `nbf` are checked by `jsonwebtoken::Validation`.
/// - `iat` is checked here so that a future `iat` surfaces as its own variant.
#[derive(Debug, Clone, Deserialize)]
struct SessionClaims {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    iat: Option<i64>,
    #[serde(default)]
    azp: Option<String>,
}

/// Networkless session token verifier (RS256 PEM in production).
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    leeway_seconds: u64,
    authorized_parties: Vec<String>,
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .field("authorized_parties", &self.authorized_parties)
            .finish()
    }
}

impl JwtVerifier {
    pub fn from_rsa_pem(
        public_key_pem: &str,
        leeway_seconds: u64,
        authorized_parties: Vec<String>,
    ) -> Result<Self, JwtVerifierError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(JwtVerifierError::InvalidKey)?;

        Ok(Self::new(
            decoding_key,
            Algorithm::RS256,
            leeway_seconds,
            authorized_parties,
        ))
    }

    pub fn new(
        decoding_key: DecodingKey,
        algorithm: Algorithm,
        leeway_seconds: u64,
        authorized_parties: Vec<String>,
    ) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;
        // Session tokens carry no audience; `azp` is checked below instead.
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key,
            validation,
            leeway_seconds,
            authorized_parties,
        }
    }

    /// Verify signature + time claims and return the subject.
    ///
    /// Check order: signature, `nbf`, `exp` (jsonwebtoken), then `iat`, `sub`, `azp`.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        let data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| VerifyError::Rejected(e.to_string()))?;

        self.check_claims(data.claims, chrono::Utc::now().timestamp())
    }

    fn check_claims(&self, claims: SessionClaims, now: i64) -> Result<Claims, VerifyError> {
        let leeway = i64::try_from(self.leeway_seconds).unwrap_or(i64::MAX);

        if let Some(iat) = claims.iat
            && iat > now.saturating_add(leeway)
        {
            return Err(VerifyError::IssuedInFuture { iat, now });
        }

        if claims.sub.trim().is_empty() {
            return Err(VerifyError::Rejected("empty 'sub' claim".into()));
        }

        // A token without `azp` is accepted; a token with an unknown one is not.
        if !self.authorized_parties.is_empty()
            && let Some(azp) = claims.azp.as_deref()
            && !self.authorized_parties.iter().any(|p| p == azp)
        {
            return Err(VerifyError::Rejected(format!(
                "invalid authorized party: {azp}"
            )));
        }

        Ok(Claims {
            subject: claims.sub,
            issued_at: claims.iat,
        })
    }
}
