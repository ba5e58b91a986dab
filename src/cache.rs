// ABOUTME: TTL-bounded in-memory cache for formatted profile summary text
// ABOUTME: Injectable component for prompt-construction callers; never read by the reward engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile summary cache
//!
//! Prompt-construction callers reuse a formatted text rendering of a user's
//! game profile for a few minutes rather than re-reading the store on every
//! request. Staleness is tolerated here by design; the transactional game
//! profile store is the only source of truth and this cache never feeds back
//! into reward computation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Default time-to-live for a cached summary
pub const DEFAULT_SUMMARY_TTL: Duration = Duration::from_secs(5 * 60);

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// LRU cache of formatted profile summaries keyed by user id
#[derive(Clone)]
pub struct ProfileSummaryCache {
    store: Arc<RwLock<LruCache<Uuid, CacheEntry>>>,
    ttl: Duration,
}

impl ProfileSummaryCache {
    /// Create a cache with the default capacity and TTL
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SUMMARY_TTL)
    }

    /// Create a cache with a custom TTL
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(LruCache::new(DEFAULT_CAPACITY))),
            ttl,
        }
    }

    /// Fetch the cached summary for a user if present and not expired
    ///
    /// Expired entries are evicted on read; there is no background sweeper.
    pub async fn get(&self, user_id: Uuid) -> Option<String> {
        let mut store = self.store.write().await;
        match store.get(&user_id) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => {
                store.pop(&user_id);
                None
            }
            None => None,
        }
    }

    /// Store a freshly formatted summary for a user
    pub async fn insert(&self, user_id: Uuid, value: String) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.store.write().await.put(user_id, entry);
    }

    /// Drop a user's cached summary, forcing the next read to rebuild it
    pub async fn invalidate(&self, user_id: Uuid) {
        self.store.write().await.pop(&user_id);
    }
}

impl Default for ProfileSummaryCache {
    fn default() -> Self {
        Self::new()
    }
}
