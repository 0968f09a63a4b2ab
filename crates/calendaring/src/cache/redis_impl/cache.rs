//! Redis cache implementation.
//!
//! The connection is established lazily on first use, so the service starts
//! even when Redis is down. After a failed connection attempt further
//! attempts are suppressed for `reconnect_interval`; calls in that window
//! fail fast with `CacheError::ConnectionFailed`. Once connected, the
//! connection manager handles reconnects on its own.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use calendaring_core::cache::{Cache, CacheError, Result};

use super::error::map_redis_error;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis cache backend using a connection manager.
pub struct RedisCache {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
    /// Earliest instant at which a new connection attempt is allowed.
    retry_at: Mutex<Option<Instant>>,
    reconnect_interval: Duration,
}

impl RedisCache {
    /// Creates a new Redis cache without connecting.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `reconnect_interval` - Minimum delay between failed connection attempts
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(url: &str, reconnect_interval: Duration) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            retry_at: Mutex::new(None),
            reconnect_interval,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        if let Some(conn) = self.conn.get() {
            return Ok(conn.clone());
        }

        let retry_at = *self.retry_at.lock().unwrap_or_else(PoisonError::into_inner);
        if retry_at.is_some_and(|at| Instant::now() < at) {
            return Err(CacheError::ConnectionFailed(
                "waiting before reconnecting".to_string(),
            ));
        }

        let result = self
            .conn
            .get_or_try_init(|| {
                // One attempt per call; `retry_at` throttles the next one.
                let config = ConnectionManagerConfig::new()
                    .set_number_of_retries(0)
                    .set_connection_timeout(CONNECT_TIMEOUT)
                    .set_response_timeout(RESPONSE_TIMEOUT);
                ConnectionManager::new_with_config(self.client.clone(), config)
            })
            .await;

        match result {
            Ok(conn) => {
                tracing::info!("Connected to Redis");
                Ok(conn.clone())
            }
            Err(err) => {
                *self.retry_at.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(Instant::now() + self.reconnect_interval);
                Err(CacheError::ConnectionFailed(err.to_string()))
            }
        }
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let result: Option<String> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        let cache = RedisCache::new(&redis_url(), Duration::from_secs(1)).ok()?;
        cache.get("test:redis_cache:ping").await.ok()?;
        Some(cache)
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("test:redis_cache:{}:{}", nanos, suffix)
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(RedisCache::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_fast_after_first_attempt() {
        // Port 1 is never a Redis server.
        let cache = RedisCache::new("redis://127.0.0.1:1", Duration::from_secs(60)).unwrap();

        let first = cache.get("any").await;
        assert!(matches!(first, Err(CacheError::ConnectionFailed(_))));

        let started = Instant::now();
        let second = cache.get("any").await;
        assert!(matches!(second, Err(CacheError::ConnectionFailed(_))));
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        cache
            .set(&key, "[]", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("nonexistent");
        assert_eq!(cache.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");

        // Sub-second TTLs are rounded up to one second
        cache
            .set(&key, "expiring value", Duration::from_millis(10))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_overwrite() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("overwrite");

        cache
            .set(&key, "initial", Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set(&key, "updated", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some("updated".to_string()));
    }
}
