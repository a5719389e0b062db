use serde::Deserialize;
use url::Url;

use crate::services::auth::provider::{UserFetchError, UserRecord};

/// Backend API client for user lookups (`GET /users/{id}`).
#[derive(Clone)]
pub struct ClerkUserClient {
    http: reqwest::Client,
    api_url: Url,
    secret_key: String,
}

impl std::fmt::Debug for ClerkUserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the secret key
        f.debug_struct("ClerkUserClient")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ClerkUser {
    #[serde(default)]
    banned: bool,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email_addresses: Vec<ClerkEmailAddress>,
}

#[derive(Debug, Deserialize)]
struct ClerkEmailAddress {
    email_address: String,
}

impl From<ClerkUser> for UserRecord {
    fn from(u: ClerkUser) -> Self {
        Self {
            banned: u.banned,
            first_name: u.first_name.unwrap_or_default(),
            last_name: u.last_name.unwrap_or_default(),
            image_url: u.image_url.unwrap_or_default(),
            username: u.username,
            email_addresses: u
                .email_addresses
                .into_iter()
                .map(|e| e.email_address)
                .collect(),
        }
    }
}

impl ClerkUserClient {
    pub fn new(
        http: reqwest::Client,
        api_url: &str,
        secret_key: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            api_url: Url::parse(api_url)?,
            secret_key: secret_key.into(),
        })
    }

    pub async fn get_user(&self, subject: &str) -> Result<UserRecord, UserFetchError> {
        let url = self.user_url(subject)?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| UserFetchError(format!("user lookup request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UserFetchError(format!("user lookup returned {status}")));
        }

        let user: ClerkUser = resp
            .json()
            .await
            .map_err(|e| UserFetchError(format!("invalid user lookup response: {e}")))?;

        Ok(user.into())
    }

    // `subject` is pushed as a single path segment, so it is percent-encoded.
    fn user_url(&self, subject: &str) -> Result<Url, UserFetchError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| UserFetchError("identity provider url cannot be a base".into()))?
            .pop_if_empty()
            .push("users")
            .push(subject);
        Ok(url)
    }
}
