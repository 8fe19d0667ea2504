//! Cache Module
//!
//! Provides an in-memory byte cache with a fixed time-to-live and periodic
//! background eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::ExpiringCache;

pub(crate) use store::CacheShared;
