//! Application state shared by all request handlers.
//!
//! Client handles (cache backend, upstream client, token source) are built
//! once at start-up and reused for every request. The cache backend is
//! selected via feature flags.

use std::sync::Arc;
use std::time::Duration;

use calendaring_core::cache::Cache;
use calendaring_core::holiday::{EventResolver, HolidayProvider};

use crate::cache::CacheGateway;
use crate::config::Config;
use crate::google::{GoogleCalendarClient, GoogleTokenSource};
use crate::resolver::CachedEventResolver;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Turns holiday queries into events, through the cache.
    pub resolver: Arc<dyn EventResolver>,
    /// Gateway to the cache store, kept for health reporting.
    pub cache: CacheGateway,
}

impl AppState {
    /// Creates a new AppState from a cache backend and an upstream provider.
    pub fn build(
        cache: Arc<dyn Cache>,
        provider: Arc<dyn HolidayProvider>,
        cache_ttl: Duration,
    ) -> Self {
        let cache = CacheGateway::new(cache);
        let resolver = Arc::new(CachedEventResolver::new(provider, cache.clone(), cache_ttl));

        Self { resolver, cache }
    }
}

/// Builds the Google Calendar provider described by the configuration.
fn google_provider(config: &Config) -> Result<Arc<dyn HolidayProvider>, anyhow::Error> {
    let credentials = config.google_credentials()?;

    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout())
        .build()?;

    let tokens = Arc::new(GoogleTokenSource::new(
        http.clone(),
        &config.token_url,
        credentials,
    ));

    Ok(Arc::new(GoogleCalendarClient::new(
        http,
        &config.calendar_api_url,
        tokens,
    )))
}

// ============================================================================
// Feature-gated factory implementations
// ============================================================================

#[cfg(feature = "memory")]
mod memory_backend {
    use super::*;
    use crate::cache::MemoryCache;

    impl AppState {
        /// Creates AppState with the in-process LRU cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let provider = google_provider(config)?;
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            tracing::info!(
                max_entries = config.cache_max_entries,
                ttl_seconds = config.cache_ttl_seconds,
                "Using in-memory cache"
            );

            Ok(Self::build(cache, provider, config.cache_ttl()))
        }
    }
}

#[cfg(feature = "redis")]
mod redis_backend {
    use super::*;
    use crate::cache::RedisCache;

    /// Minimum delay between failed Redis connection attempts.
    const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

    impl AppState {
        /// Creates AppState with the Redis cache.
        ///
        /// Does not wait for Redis: if it is down the service starts with a
        /// degraded cache and connects once Redis becomes reachable.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let provider = google_provider(config)?;
            let cache = Arc::new(RedisCache::new(&config.redis_url, RECONNECT_INTERVAL)?);

            tracing::info!(
                ttl_seconds = config.cache_ttl_seconds,
                "Using Redis cache"
            );

            let state = Self::build(cache, provider, config.cache_ttl());

            // Warm the connection so /healthz is accurate from the start.
            state.cache.get("calendaring:warmup").await;

            Ok(state)
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
