//! Time-expiring result cache backed by moka.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::models::RepositoryRecord;
use crate::traits::RepoCache;

/// Configuration for the result cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live measured from insertion.
    pub ttl: Duration,

    /// Optional entry cap. `None` keeps the cache unbounded, which matches
    /// the observed behavior; set it to guard against unbounded growth
    /// from many distinct usernames.
    pub max_capacity: Option<u64>,
}

impl Default for CacheConfig {
    /// One-hour TTL, no capacity bound.
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: None,
        }
    }
}

/// [`RepoCache`] implementation over `moka::future::Cache`.
///
/// moka gives lazy per-key expiry and atomic insert/read, so no reader can
/// observe a half-written entry.
#[derive(Clone)]
pub struct MokaRepoCache {
    inner: Cache<String, Arc<Vec<RepositoryRecord>>>,
}

impl MokaRepoCache {
    pub fn new(config: CacheConfig) -> Self {
        let mut builder = Cache::builder().time_to_live(config.ttl);
        if let Some(cap) = config.max_capacity {
            builder = builder.max_capacity(cap);
        }
        Self {
            inner: builder.build(),
        }
    }
}

impl Default for MokaRepoCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl RepoCache for MokaRepoCache {
    async fn get(&self, key: &str) -> Option<Arc<Vec<RepositoryRecord>>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: String, records: Vec<RepositoryRecord>) {
        self.inner.insert(key, Arc::new(records)).await;
    }

    fn has(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }
}
