//! Cache Module
//!
//! Provides best-effort in-memory memoization with lazy TTL expiration and
//! pattern invalidation. There is no size bound and no background sweep:
//! expired entries are dropped when a read notices them.

mod entry;
mod pattern;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use pattern::InvalidationPattern;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL in seconds applied when a caller does not pick one
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Cache of JSON payloads shared between the API client and the auth session.
pub type SharedCache = Arc<RwLock<CacheStore<serde_json::Value>>>;

/// Creates an empty shared cache with the given default TTL.
pub fn shared_cache(default_ttl: u64) -> SharedCache {
    Arc::new(RwLock::new(CacheStore::new(default_ttl)))
}
