//! Cache Store Module
//!
//! Time-expiring cache combining a HashMap under an RwLock with a background
//! reaper that evicts stale entries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{PokedexError, Result};
use crate::tasks::{spawn_reaper, ReaperHandle};

// == Cache Shared ==
/// State shared between cache handles and the reaper task.
#[derive(Debug)]
pub(crate) struct CacheShared {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Hit/miss/reap counters
    stats: StatsCounters,
    /// Time-to-live and reap cadence
    interval: Duration,
}

impl CacheShared {
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    // == Reap Expired ==
    /// Removes every entry older than the interval.
    ///
    /// Returns the number of entries removed.
    pub(crate) async fn reap_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        let before = entries.len();

        entries.retain(|_, entry| !entry.is_stale(now, self.interval));

        let removed = before - entries.len();
        self.stats.record_reaped(removed);
        removed
    }
}

// == Expiring Cache ==
/// Concurrency-safe cache of raw byte payloads with a fixed time-to-live.
///
/// Cloning is cheap and every clone shares the same storage. Reads never check
/// expiry: stale entries stay visible until the next reap pass, so an entry
/// lives between one and two intervals. The reaper stops on [`shutdown`] or
/// once the last clone is dropped.
///
/// [`shutdown`]: ExpiringCache::shutdown
#[derive(Debug, Clone)]
pub struct ExpiringCache {
    shared: Arc<CacheShared>,
    reaper: Arc<Mutex<Option<ReaperHandle>>>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current runtime.
    ///
    /// # Errors
    /// - `InvalidInterval` if `interval` is zero
    /// - `NoRuntime` if called outside a tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PokedexError::InvalidInterval);
        }
        tokio::runtime::Handle::try_current().map_err(|_| PokedexError::NoRuntime)?;

        let shared = Arc::new(CacheShared {
            entries: RwLock::new(HashMap::new()),
            stats: StatsCounters::default(),
            interval,
        });
        let reaper = spawn_reaper(Arc::clone(&shared));

        Ok(Self {
            shared,
            reaper: Arc::new(Mutex::new(Some(reaper))),
        })
    }

    // == Add ==
    /// Inserts or replaces the entry for `key`, restarting its lifetime.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let entry = CacheEntry::new(value.into());
        self.shared.entries.write().await.insert(key.into(), entry);
    }

    // == Get ==
    /// Returns a copy of the payload stored for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let value = self
            .shared
            .entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.value.clone());

        match value {
            Some(_) => self.shared.stats.record_hit(),
            None => self.shared.stats.record_miss(),
        }
        value
    }

    /// The configured time-to-live.
    pub fn interval(&self) -> Duration {
        self.shared.interval
    }

    // == Length ==
    /// Returns the current number of entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.shared.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.shared.entries.read().await.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let total = self.len().await;
        self.shared.stats.snapshot(total)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    ///
    /// Entries already stored stay readable but are no longer evicted.
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&self) {
        let handle = self.reaper.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
        }
    }

    #[cfg(test)]
    pub(crate) fn shared_for_test(&self) -> Arc<CacheShared> {
        Arc::clone(&self.shared)
    }

    #[cfg(test)]
    pub(crate) async fn reap_now(&self) -> usize {
        self.shared.reap_expired().await
    }
}
