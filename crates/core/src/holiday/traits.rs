use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{HolidayEvent, HolidayQuery, Result, UpstreamError, UpstreamEvent};

/// Upstream calendar provider.
#[async_trait]
pub trait HolidayProvider: Send + Sync {
    /// Lists the events of a calendar between `time_min` and `time_max`.
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> std::result::Result<Vec<UpstreamEvent>, UpstreamError>;
}

/// Resolves a holiday query into the events served to clients.
#[async_trait]
pub trait EventResolver: Send + Sync {
    async fn resolve(&self, query: &HolidayQuery) -> Result<Vec<HolidayEvent>>;
}
