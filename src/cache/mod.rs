//! Cache Module
//!
//! Bounded, recency-ordered in-memory cache for reusable pipeline state.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::RecencyCache;

// == Public Constants ==
/// Number of pipeline states a host keeps unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 10;
