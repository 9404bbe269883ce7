//! Reporting cache
//!
//! Listing and report rows are memoized in a [`ReportsCache`]. Writers never
//! touch the cache directly; they hold a [`CacheInvalidator`] and flush it after
//! every successful write.

pub mod reports;

use async_trait::async_trait;

pub use reports::ReportsCache;

#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Drop every cached report; fire and forget
    async fn flush_cache(&self);
}

/// Invalidator for pages that have no reports depending on them
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopInvalidator;

#[async_trait]
impl CacheInvalidator for NoopInvalidator {
    async fn flush_cache(&self) {}
}
