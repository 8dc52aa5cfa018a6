//! Driver Cache - pipeline state reuse for a persistent compiler host
//!
//! Provides a bounded, recency-ordered cache of generator pipeline state and
//! the host driver that fingerprints configurations and reuses cached state.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod models;

pub use api::AppState;
pub use cache::{RecencyCache, SharedCache, DEFAULT_CAPACITY};
pub use config::Config;
pub use error::DriverError;
pub use host::{HostDriver, PipelineConfig};
