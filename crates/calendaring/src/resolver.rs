//! Read-through holiday resolver.
//!
//! Serves a query from the cache when possible. On a miss it fetches the
//! holiday calendar upstream, keeps the events that carry locations, and
//! stores the result in the background before returning it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use calendaring_core::cache::{deserialize_events, serialize_events};
use calendaring_core::holiday::{
    transform_events, EventResolver, HolidayEvent, HolidayProvider, HolidayQuery, Result,
};

use crate::cache::CacheGateway;

/// Event resolver backed by a cache gateway and an upstream provider.
///
/// # Type Parameters
///
/// * `P` - The upstream provider implementation
pub struct CachedEventResolver<P>
where
    P: HolidayProvider + ?Sized,
{
    provider: Arc<P>,
    cache: CacheGateway,
    ttl: Duration,
}

impl<P> CachedEventResolver<P>
where
    P: HolidayProvider + ?Sized,
{
    /// Creates a new resolver.
    ///
    /// # Arguments
    ///
    /// * `provider` - Upstream source of holiday calendars
    /// * `cache` - Gateway in front of the cache store
    /// * `ttl` - Lifetime of a cached result
    pub fn new(provider: Arc<P>, cache: CacheGateway, ttl: Duration) -> Self {
        Self {
            provider,
            cache,
            ttl,
        }
    }

    async fn cached(&self, key: &str) -> Option<Vec<HolidayEvent>> {
        let payload = self.cache.get(key).await?;
        match deserialize_events(&payload) {
            Ok(events) => Some(events),
            Err(err) => {
                tracing::warn!(key, error = %err, "Cached payload unreadable, refetching");
                None
            }
        }
    }
}

#[async_trait]
impl<P> EventResolver for CachedEventResolver<P>
where
    P: HolidayProvider + ?Sized + 'static,
{
    async fn resolve(&self, query: &HolidayQuery) -> Result<Vec<HolidayEvent>> {
        let key = query.cache_key();

        if let Some(events) = self.cached(&key).await {
            tracing::debug!(key = %key, "Cache hit");
            return Ok(events);
        }

        tracing::debug!(key = %key, "Cache miss");
        let upstream = self
            .provider
            .list_events(&query.calendar_id(), query.from, query.to)
            .await?;

        let events: Vec<HolidayEvent> = transform_events(upstream)?;

        match serialize_events(&events) {
            Ok(payload) => {
                self.cache.spawn_set(key, payload, self.ttl);
            }
            Err(err) => tracing::warn!(key = %key, error = %err, "Failed to serialize events"),
        }

        Ok(events)
    }
}
