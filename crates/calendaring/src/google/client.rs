//! Google Calendar events client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use tracing::instrument;

use calendaring_core::cache::format_instant;
use calendaring_core::holiday::{HolidayProvider, UpstreamError, UpstreamEvent};

use super::auth::GoogleTokenSource;
use super::error::{map_reqwest_error, map_status};
use super::types::EventListResponse;

/// Lists events of public holiday calendars through the Calendar v3 API.
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<GoogleTokenSource>,
}

impl GoogleCalendarClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: Arc<GoogleTokenSource>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<EventListResponse, UpstreamError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| UpstreamError::InvalidResponse(e.to_string()));
        }

        if status == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }

        let text = response.text().await.unwrap_or_default();
        Err(map_status(status, text))
    }
}

#[async_trait]
impl HolidayProvider for GoogleCalendarClient {
    #[instrument(skip(self), level = "info")]
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<UpstreamEvent>, UpstreamError> {
        let access_token = self.tokens.access_token().await?;

        let url = format!(
            "{}/calendars/{}/events?timeMin={}&timeMax={}",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&format_instant(&time_min)),
            urlencoding::encode(&format_instant(&time_max)),
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&access_token)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body = self.handle_response(response).await?;
        tracing::debug!(count = body.items.len(), "Fetched upstream events");

        Ok(body.items.into_iter().map(UpstreamEvent::from).collect())
    }
}
