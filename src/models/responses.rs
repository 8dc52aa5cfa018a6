//! Response DTOs for the compiler host API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::host::{PipelineState, PreparedPipeline};

/// Response body for POST /pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResponse {
    /// Fingerprint the pipeline state is cached under
    pub key: String,
    /// Whether the state was reused from the cache
    pub cache_hit: bool,
    /// Build that produced the returned state
    pub build_id: u64,
    /// Generators the state was built with
    pub generators: Vec<String>,
    /// When the returned state was built, RFC 3339
    pub created_at: String,
}

impl From<&PreparedPipeline<PipelineState>> for PipelineResponse {
    fn from(prepared: &PreparedPipeline<PipelineState>) -> Self {
        Self {
            key: prepared.key.clone(),
            cache_hit: prepared.cache_hit,
            build_id: prepared.state.build_id,
            generators: prepared.state.generators.clone(),
            created_at: prepared.state.created_at.to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of new keys inserted
    pub inserts: u64,
    /// Number of inserts that replaced an existing key
    pub replacements: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Maximum number of entries
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            replacements: stats.replacements,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_pipeline_response_from_prepared() {
        let prepared = PreparedPipeline {
            key: "abc123".to_string(),
            state: Arc::new(PipelineState {
                build_id: 7,
                generators: vec!["RegexGenerator".to_string()],
                created_at: chrono::Utc::now(),
            }),
            cache_hit: true,
        };

        let resp = PipelineResponse::from(&prepared);
        assert_eq!(resp.key, "abc123");
        assert!(resp.cache_hit);
        assert_eq!(resp.build_id, 7);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("RegexGenerator"));
        assert!(json.contains("created_at"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            total_entries: 10,
            capacity: 10,
            ..CacheStats::default()
        };
        let resp = StatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.capacity, 10);
    }

    #[test]
    fn test_stats_response_zero_requests() {
        let resp = StatsResponse::from(CacheStats::new(10));
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
