//! Caching layer for built planning graphs.
//!
//! A graph is the only cacheable artifact: it is expensive to build (one
//! catalog fetch per train) and valid for a whole journey date. The key
//! includes the train-universe cap, since different caps see different
//! train sets and therefore different graphs. Entries are immutable once
//! published and age out on a TTL because the catalog underneath can
//! change between builds.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::graph::{BuildError, StationPairGraph};

/// Cache key for graphs: (journey date, train-universe cap).
pub type GraphKey = (NaiveDate, usize);

/// Configuration for the graph cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached graphs.
    pub ttl: Duration,

    /// Maximum number of cached graphs.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 32,
        }
    }
}

/// Cache of built station-pair graphs.
pub struct GraphCache {
    graphs: MokaCache<GraphKey, Arc<StationPairGraph>>,
}

impl GraphCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let graphs = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { graphs }
    }

    /// Get the graph for `key`, running `build` on a miss.
    ///
    /// Concurrent callers with the same key coalesce onto one build and all
    /// observe its result; only a completed graph is ever published. A
    /// failed build is not cached, so the next caller retries.
    pub async fn get_or_build<F>(
        &self,
        key: GraphKey,
        build: F,
    ) -> Result<Arc<StationPairGraph>, Arc<BuildError>>
    where
        F: Future<Output = Result<StationPairGraph, BuildError>>,
    {
        self.graphs
            .try_get_with(key, async move { build.await.map(Arc::new) })
            .await
    }

    /// Number of cached graphs.
    pub fn entry_count(&self) -> u64 {
        self.graphs.entry_count()
    }

    /// Drop every cached graph.
    pub fn invalidate_all(&self) {
        self.graphs.invalidate_all();
    }

    /// Flush moka's pending maintenance so `entry_count` is exact.
    #[cfg(test)]
    pub(crate) async fn run_pending_tasks(&self) {
        self.graphs.run_pending_tasks().await;
    }
}
