//! Response models for the compiler host API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into HTTP
//! response bodies. Request bodies deserialize straight into
//! [`PipelineConfig`](crate::host::PipelineConfig).

pub mod responses;

// Re-export commonly used types
pub use responses::{HealthResponse, PipelineResponse, StatsResponse};
