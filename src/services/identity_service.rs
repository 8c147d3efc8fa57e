//! Client for the external identity service.
//!
//! Identities (names, avatar) live in a third-party auth provider. The gallery
//! only ever resolves them by id, so the seam is a single lookup.

use crate::models::identity::Identity;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("identity service returned HTTP {status} for user `{user_id}`")]
    UnexpectedStatus { user_id: String, status: u16 },
    #[error("identity service sent an unreadable record for user `{user_id}`: {source}")]
    Decode {
        user_id: String,
        source: reqwest::Error,
    },
    #[error("identity service is not configured: {0}")]
    Misconfigured(String),
}

/// Resolves identity records by external id.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetch an identity. `Ok(None)` means the service has no such user.
    async fn get_user(&self, user_id: &str) -> Result<Option<Identity>, IdentityError>;
}

/// HTTP client for a Clerk-style backend API (`GET {base}/users/{id}`).
pub struct HttpIdentityService {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpIdentityService {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let raw = base_url.into();
        let base_url = Url::parse(&raw)
            .map_err(|e| IdentityError::Misconfigured(format!("base URL `{raw}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(IdentityError::Misconfigured(format!(
                "base URL `{raw}` cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// `{base}/users/{user_id}` with the id percent-encoded as one segment.
    fn user_url(&self, user_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users").push(user_id);
        }
        url
    }
}

#[async_trait]
impl IdentityService for HttpIdentityService {
    async fn get_user(&self, user_id: &str) -> Result<Option<Identity>, IdentityError> {
        let mut request = self.client.get(self.user_url(user_id));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(user_id, "identity not found");
                Ok(None)
            }
            status if status.is_success() => {
                let user = response
                    .json::<Identity>()
                    .await
                    .map_err(|source| IdentityError::Decode {
                        user_id: user_id.to_string(),
                        source,
                    })?;
                Ok(Some(user))
            }
            status => Err(IdentityError::UnexpectedStatus {
                user_id: user_id.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
