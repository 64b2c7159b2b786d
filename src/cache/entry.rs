//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached payload together with the moment it was stored and its lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time to live in milliseconds
    pub ttl_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - Lifetime in seconds
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        Self {
            value,
            created_at: current_timestamp_ms(),
            ttl_ms: ttl_seconds.saturating_mul(1000),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry stays live while `now - created_at <= ttl_ms`; it is expired
    /// only once strictly more than its TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`is_expired`](Self::is_expired) against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) > self.ttl_ms
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        let age = current_timestamp_ms().saturating_sub(self.created_at);
        self.ttl_ms.saturating_sub(age)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as 0.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("payload".to_string(), 60);

        assert_eq!(entry.value, "payload");
        assert_eq!(entry.ttl_ms, 60_000);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(1u32, 1);

        assert!(!entry.is_expired());

        // Wait for expiration
        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_is_inclusive() {
        let entry = CacheEntry {
            value: (),
            created_at: 10_000,
            ttl_ms: 1_000,
        };

        // Exactly ttl elapsed is still live
        assert!(!entry.is_expired_at(11_000));
        assert!(entry.is_expired_at(11_001));
    }

    #[test]
    fn test_zero_ttl_expires_after_any_elapsed_time() {
        let entry = CacheEntry {
            value: (),
            created_at: 5_000,
            ttl_ms: 0,
        };

        assert!(!entry.is_expired_at(5_000));
        assert!(entry.is_expired_at(5_001));
    }

    #[test]
    fn test_ttl_remaining_ms() {
        let entry = CacheEntry::new((), 10);

        let remaining_ms = entry.ttl_remaining_ms();
        assert!(remaining_ms <= 10_000);
        assert!(remaining_ms >= 9_000);
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry {
            value: (),
            created_at: 0,
            ttl_ms: 1,
        };

        assert_eq!(entry.ttl_remaining_ms(), 0);
    }
}
