use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations over string payloads.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Sets a value in the cache, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}
