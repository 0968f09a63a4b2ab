//! Fault-tolerant front for the cache backend.
//!
//! The gateway never returns an error: a failed read is a miss and a failed
//! write is dropped. A connection failure flips the gateway to
//! [`CacheStatus::Degraded`]; the next successful store call flips it back.
//! Each transition is logged once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use calendaring_core::cache::{Cache, CacheError, CacheStatus};

/// Read-through cache gateway shared by all requests.
#[derive(Clone)]
pub struct CacheGateway {
    cache: Arc<dyn Cache>,
    ready: Arc<AtomicBool>,
}

impl CacheGateway {
    /// Wraps a cache backend. The gateway starts out `Ready`.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            ready: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Current readiness of the backing store.
    pub fn status(&self) -> CacheStatus {
        if self.ready.load(Ordering::SeqCst) {
            CacheStatus::Ready
        } else {
            CacheStatus::Degraded
        }
    }

    /// Reads a payload, treating every store error as a miss.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.cache.get(key).await {
            Ok(value) => {
                self.mark_ready();
                value
            }
            Err(err) => {
                self.record_failure("get", key, &err);
                None
            }
        }
    }

    /// Writes a payload. Store errors are logged and swallowed.
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) {
        match self.cache.set(key, value, ttl).await {
            Ok(()) => self.mark_ready(),
            Err(err) => self.record_failure("set", key, &err),
        }
    }

    /// Writes a payload on a detached task; the caller does not wait for it.
    pub fn spawn_set(&self, key: String, value: String, ttl: Duration) -> JoinHandle<()> {
        let gateway = self.clone();
        tokio::spawn(async move {
            gateway.set(&key, &value, ttl).await;
        })
    }

    fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::SeqCst) {
            tracing::info!("Cache store available again, caching resumed");
        }
    }

    fn record_failure(&self, operation: &'static str, key: &str, err: &CacheError) {
        if err.is_connection_error() {
            if self.ready.swap(false, Ordering::SeqCst) {
                tracing::warn!(error = %err, "Cache store unavailable, serving without cache");
            }
        } else {
            tracing::warn!(operation, key, error = %err, "Cache operation failed");
        }
    }
}
