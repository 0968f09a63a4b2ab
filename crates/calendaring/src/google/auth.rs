//! OAuth2 access tokens from a long-lived refresh token.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

use calendaring_core::holiday::UpstreamError;

use super::error::map_reqwest_error;

/// Tokens are refreshed this long before Google says they expire.
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Upper bound on the lifetime claimed by the token endpoint.
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// OAuth2 client credentials plus the refresh token issued for them.
#[derive(Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + REFRESH_MARGIN < self.expires_at
    }
}

/// Hands out access tokens, refreshing them against the token endpoint.
pub struct GoogleTokenSource {
    http: reqwest::Client,
    token_url: String,
    credentials: GoogleCredentials,
    current: RwLock<Option<AccessToken>>,
}

impl GoogleTokenSource {
    pub fn new(http: reqwest::Client, token_url: &str, credentials: GoogleCredentials) -> Self {
        Self {
            http,
            token_url: token_url.to_string(),
            credentials,
            current: RwLock::new(None),
        }
    }

    /// Returns a valid access token, refreshing it first if needed.
    pub async fn access_token(&self) -> Result<String, UpstreamError> {
        if let Some(token) = self.current.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let mut current = self.current.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(token) = current.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let token = self.refresh().await?;
        let value = token.value.clone();
        *current = Some(token);
        Ok(value)
    }

    /// Drops the cached token so the next call refreshes.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn refresh(&self) -> Result<AccessToken, UpstreamError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("refresh_token", self.credentials.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Auth(format!(
                "Token refresh failed with {}: {}",
                status, text
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Auth(format!("Invalid token response: {}", e)))?;

        tracing::debug!(expires_in = body.expires_in, "Refreshed access token");

        let lifetime = Duration::from_secs(body.expires_in).min(MAX_TOKEN_LIFETIME);

        Ok(AccessToken {
            value: body.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }
}
