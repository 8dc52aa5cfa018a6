//! Host Driver
//!
//! Decides when a compilation request can reuse cached pipeline state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::cache::{CacheStats, SharedCache};
use crate::error::Result;
use crate::host::{fingerprint, PipelineConfig};

// == Pipeline Builder ==
/// Constructs pipeline state for a configuration on a cache miss.
///
/// Called without any cache lock held.
pub trait PipelineBuilder: Send + Sync {
    /// The state kept in the cache. Never mutated once built.
    type State: Send + Sync;

    fn build(&self, config: &PipelineConfig) -> Self::State;
}

// == Default Pipeline State ==
/// State produced by [`DefaultPipelineBuilder`].
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    /// Sequence number of the build that produced this state
    pub build_id: u64,
    /// Generators the pipeline was built with, in order
    pub generators: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Builder used by the daemon; numbers each build so reuse is observable.
#[derive(Debug, Default)]
pub struct DefaultPipelineBuilder {
    builds: AtomicU64,
}

impl DefaultPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states built so far.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}

impl PipelineBuilder for DefaultPipelineBuilder {
    type State = PipelineState;

    fn build(&self, config: &PipelineConfig) -> PipelineState {
        let build_id = self.builds.fetch_add(1, Ordering::Relaxed) + 1;
        PipelineState {
            build_id,
            generators: config.generators.clone(),
            created_at: Utc::now(),
        }
    }
}

// == Prepared Pipeline ==
/// Result of preparing a pipeline for one compilation request.
#[derive(Debug)]
pub struct PreparedPipeline<S> {
    /// Fingerprint the state is cached under
    pub key: String,
    /// Shared, read-only pipeline state
    pub state: Arc<S>,
    /// True when the state came from the cache
    pub cache_hit: bool,
}

// == Host Driver ==
/// Consumer of the pipeline cache inside a long-lived compiler host.
///
/// The cache is injected, so several drivers (or tests) can share or isolate
/// caches explicitly.
pub struct HostDriver<B: PipelineBuilder> {
    cache: SharedCache<Arc<B::State>>,
    builder: B,
}

impl<B: PipelineBuilder> HostDriver<B> {
    /// Creates a driver over an existing cache.
    pub fn new(cache: SharedCache<Arc<B::State>>, builder: B) -> Self {
        Self { cache, builder }
    }

    /// Creates a driver with its own cache of `capacity` entries.
    pub fn with_capacity(capacity: usize, builder: B) -> Result<Self> {
        Ok(Self::new(SharedCache::new(capacity)?, builder))
    }

    // == Prepare ==
    /// Returns pipeline state for `config`, reusing cached state when the
    /// fingerprint matches and building (then caching) it otherwise.
    pub fn prepare(&self, config: &PipelineConfig) -> PreparedPipeline<B::State> {
        let key = fingerprint(config);

        if let Some(state) = self.cache.lookup(&key) {
            debug!(key = %key, output = %config.output_path, "reusing cached pipeline state");
            return PreparedPipeline {
                key,
                state,
                cache_hit: true,
            };
        }

        debug!(key = %key, output = %config.output_path, "building pipeline state");
        let state = Arc::new(self.builder.build(config));

        self.cache.insert(key.as_str(), Arc::clone(&state));

        PreparedPipeline {
            key,
            state,
            cache_hit: false,
        }
    }

    pub fn cache(&self) -> &SharedCache<Arc<B::State>> {
        &self.cache
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(capacity: usize) -> HostDriver<DefaultPipelineBuilder> {
        HostDriver::with_capacity(capacity, DefaultPipelineBuilder::new()).unwrap()
    }

    fn project(n: usize) -> PipelineConfig {
        PipelineConfig::new(format!("bin/project{n}.dll")).with_generator("RegexGenerator")
    }

    #[test]
    fn test_prepare_miss_then_hit() {
        let driver = driver(10);

        let first = driver.prepare(&project(1));
        let second = driver.prepare(&project(1));

        assert!(!first.cache_hit);
        assert!(second.cache_hit);
        assert_eq!(first.key, second.key);
        assert!(Arc::ptr_eq(&first.state, &second.state));
        assert_eq!(driver.builder().builds(), 1);
    }

    #[test]
    fn test_prepare_distinct_configs_build_separately() {
        let driver = driver(10);

        let a = driver.prepare(&project(1));
        let b = driver.prepare(&project(2));

        assert_ne!(a.key, b.key);
        assert_eq!(a.state.build_id, 1);
        assert_eq!(b.state.build_id, 2);
        assert_eq!(driver.stats().total_entries, 2);
    }

    #[test]
    fn test_prepare_rebuilds_after_eviction() {
        let driver = driver(2);

        driver.prepare(&project(1));
        driver.prepare(&project(2));
        driver.prepare(&project(3)); // evicts project 1

        let again = driver.prepare(&project(1));

        assert!(!again.cache_hit);
        assert_eq!(again.state.build_id, 4);
        assert_eq!(driver.stats().evictions, 2);
    }

    #[test]
    fn test_prepare_records_generators() {
        let driver = driver(10);
        let config = PipelineConfig::new("out.dll")
            .with_generator("A")
            .with_generator("B");

        let prepared = driver.prepare(&config);

        assert_eq!(prepared.state.generators, vec!["A", "B"]);
    }

    #[test]
    fn test_drivers_share_injected_cache() {
        let cache = SharedCache::new(10).unwrap();
        let first = HostDriver::new(cache.clone(), DefaultPipelineBuilder::new());
        let second = HostDriver::new(cache, DefaultPipelineBuilder::new());

        first.prepare(&project(1));
        let reused = second.prepare(&project(1));

        assert!(reused.cache_hit);
        assert_eq!(second.builder().builds(), 0);
        assert_eq!(first.cache().recency_order(), vec![reused.key]);
    }

    #[test]
    fn test_with_capacity_zero_rejected() {
        assert!(HostDriver::with_capacity(0, DefaultPipelineBuilder::new()).is_err());
    }
}
