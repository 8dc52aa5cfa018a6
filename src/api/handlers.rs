//! API Handlers
//!
//! HTTP request handlers for each compiler host endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{DriverError, Result};
use crate::host::{DefaultPipelineBuilder, HostDriver, PipelineConfig, PipelineState};
use crate::models::{HealthResponse, PipelineResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the host driver, which owns a handle to the process-wide pipeline
/// cache. Cloning the state clones handles, never the cache.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<HostDriver<DefaultPipelineBuilder>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: SharedCache<Arc<PipelineState>>) -> Self {
        Self {
            driver: Arc::new(HostDriver::new(cache, DefaultPipelineBuilder::new())),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SharedCache::new(config.cache_capacity)?))
    }
}

/// Handler for POST /pipeline
///
/// Prepares pipeline state for the posted configuration, reusing cached state
/// when its fingerprint is known.
pub async fn pipeline_handler(
    State(state): State<AppState>,
    Json(config): Json<PipelineConfig>,
) -> Result<Json<PipelineResponse>> {
    if let Some(error_msg) = config.validate() {
        return Err(DriverError::InvalidRequest(error_msg));
    }

    // Building may be slow; keep it off the async workers
    let driver = Arc::clone(&state.driver);
    let prepared = tokio::task::spawn_blocking(move || driver.prepare(&config))
        .await
        .map_err(|e| DriverError::Internal(format!("pipeline build failed: {e}")))?;

    debug!(key = %prepared.key, cache_hit = prepared.cache_hit, "pipeline prepared");
    Ok(Json(PipelineResponse::from(&prepared)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.driver.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default()).unwrap()
    }

    fn config(output: &str) -> PipelineConfig {
        PipelineConfig::new(output).with_generator("RegexGenerator")
    }

    #[tokio::test]
    async fn test_pipeline_handler_miss_then_hit() {
        let state = test_state();

        let first = pipeline_handler(State(state.clone()), Json(config("a.dll")))
            .await
            .unwrap();
        assert!(!first.cache_hit);

        let second = pipeline_handler(State(state.clone()), Json(config("a.dll")))
            .await
            .unwrap();
        assert!(second.cache_hit);
        assert_eq!(first.key, second.key);
        assert_eq!(first.build_id, second.build_id);
    }

    #[tokio::test]
    async fn test_pipeline_handler_invalid_request() {
        let state = test_state();

        let result = pipeline_handler(State(state), Json(PipelineConfig::new(""))).await;
        assert!(matches!(result, Err(DriverError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();
        pipeline_handler(State(state.clone()), Json(config("a.dll")))
            .await
            .unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.capacity, 10);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = Config {
            cache_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(
            AppState::from_config(&config),
            Err(DriverError::InvalidCapacity(0))
        ));
    }
}
