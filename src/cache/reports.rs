use async_trait::async_trait;
use moka::future::{Cache, CacheBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use super::CacheInvalidator;

pub const DEFAULT_CAPACITY: u64 = 1_000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Moka-backed store of computed reports, keyed by report name
pub struct ReportsCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    name: String,
    inner: Cache<String, V>,
}

impl<V> ReportsCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, capacity: u64, ttl: Duration) -> Self {
        let name = name.into();
        let inner = CacheBuilder::new(capacity)
            .name(&name)
            .time_to_live(ttl)
            .build();
        Self { name, inner }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key).await
    }

    /// Cached value for `key`, computing and storing it on a miss.
    /// Failed computations are not cached.
    pub async fn get_or_compute<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.inner.get(key).await {
            debug!("Cache '{}' hit for '{}'", self.name, key);
            return Ok(value);
        }

        debug!("Cache '{}' miss for '{}'", self.name, key);
        let value = compute().await?;
        self.inner.insert(key.to_string(), value.clone()).await;
        Ok(value)
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

impl<V> Default for ReportsCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new("reports", DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

#[async_trait]
impl<V> CacheInvalidator for ReportsCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn flush_cache(&self) {
        debug!("Flushing cache '{}'", self.name);
        self.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_get_or_compute_memoizes() {
        let cache: ReportsCache<Vec<i32>> = ReportsCache::default();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Result<Vec<i32>, ()> = cache
                .get_or_compute("numbers", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await;
            assert_eq!(value, Ok(vec![1, 2, 3]));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_computation_is_not_cached() {
        let cache: ReportsCache<String> = ReportsCache::default();

        let failed: Result<String, &str> = cache.get_or_compute("k", || async { Err("boom") }).await;
        assert_eq!(failed, Err("boom"));
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn test_flush_cache_drops_entries() {
        let cache: ReportsCache<String> = ReportsCache::new("test", 10, Duration::from_secs(60));
        let _: Result<String, ()> = cache
            .get_or_compute("k", || async { Ok("v".to_string()) })
            .await;
        assert_eq!(cache.get("k").await, Some("v".to_string()));

        cache.flush_cache().await;
        assert_eq!(cache.get("k").await, None);
    }
}
