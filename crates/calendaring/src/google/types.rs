//! Wire types of the Calendar v3 events list.

use serde::Deserialize;

use calendaring_core::holiday::UpstreamEvent;

/// Response body of `GET /calendars/{id}/events`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    #[serde(default)]
    pub items: Vec<ApiEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub start: Option<ApiEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
}

impl From<ApiEvent> for UpstreamEvent {
    fn from(api: ApiEvent) -> Self {
        let (start_date, start_date_time) = match api.start {
            Some(start) => (start.date, start.date_time),
            None => (None, None),
        };

        Self {
            summary: api.summary,
            description: api.description,
            start_date,
            start_date_time,
        }
    }
}
