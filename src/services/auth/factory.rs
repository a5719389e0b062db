/// Factory: build the identity provider from application `Config`.
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::services::auth::IdentityProvider;
use crate::services::auth::clerk::{ClerkIdentityProvider, ClerkUserClient, JwtVerifier};

pub fn build_identity_provider(
    config: &Config,
    http: reqwest::Client,
) -> Result<Arc<dyn IdentityProvider>> {
    let verifier = JwtVerifier::from_rsa_pem(
        &config.clerk_jwt_public_key_pem,
        config.auth_clock_leeway_seconds,
        config.clerk_authorized_parties.clone(),
    )
    .context("failed to build session token verifier")?;

    let users = ClerkUserClient::new(http, &config.clerk_api_url, &config.clerk_secret_key)
        .context("invalid CLERK_API_URL")?;

    Ok(Arc::new(ClerkIdentityProvider::new(verifier, users)))
}
