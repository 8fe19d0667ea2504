//! Cache Entry Module
//!
//! Defines the immutable record stored for each cached key.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored payload and the instant it was inserted.
///
/// Entries are never mutated after creation; an overwrite replaces the whole
/// entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Vec<u8>,
    /// Insertion instant
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed between insertion and `now`.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Stale ==
    /// Checks whether the entry is older than `ttl` at `now`.
    ///
    /// An entry exactly `ttl` old is still fresh; it becomes stale strictly
    /// after that.
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new(b"pikachu".to_vec());

        assert_eq!(entry.value, b"pikachu");
        assert_eq!(entry.age_at(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_ages_with_clock() {
        let entry = CacheEntry::new(Vec::new());

        tokio::time::sleep(Duration::from_millis(750)).await;

        assert!(entry.age_at(Instant::now()) >= Duration::from_millis(750));
    }

    #[tokio::test(start_paused = true)]
    async fn test_staleness_boundary() {
        let ttl = Duration::from_secs(5);
        let entry = CacheEntry::new(b"x".to_vec());
        let created = entry.created_at;

        assert!(!entry.is_stale(created, ttl));
        assert!(!entry.is_stale(created + ttl, ttl), "exactly ttl old is still fresh");
        assert!(entry.is_stale(created + ttl + Duration::from_millis(1), ttl));
    }

    #[tokio::test(start_paused = true)]
    async fn test_age_before_creation_saturates() {
        let entry = CacheEntry::new(b"x".to_vec());
        let earlier = entry.created_at - Duration::from_secs(1);

        assert_eq!(entry.age_at(earlier), Duration::ZERO);
    }
}
