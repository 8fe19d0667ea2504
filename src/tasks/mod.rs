//! Background Tasks Module
//!
//! Contains background tasks that run alongside the cache.
//!
//! # Tasks
//! - Reaper: removes expired cache entries once per cache interval

mod reaper;

pub use reaper::ReaperHandle;
pub(crate) use reaper::spawn_reaper;
