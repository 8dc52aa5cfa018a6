//! Host Module
//!
//! The compiler host side of the cache: fingerprints pipeline configurations
//! and reuses or builds pipeline state per request.

mod driver;
mod fingerprint;

pub use driver::{DefaultPipelineBuilder, HostDriver, PipelineBuilder, PipelineState, PreparedPipeline};
pub use fingerprint::{fingerprint, PipelineConfig};
