use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::CacheStore;
use super::types::CachedResponse;
use crate::api::urls::redact_api_key;
use crate::constants::cache::DEFAULT_MEMORY_CAPACITY;
use crate::models::ApiResponse;

/// In-process LRU cache store with per-entry TTL.
///
/// Expired entries are removed when they are read. Least recently used entries
/// are evicted once `capacity` is reached.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CachedResponse>>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Gets the current cache size for monitoring purposes
    pub fn len(&self) -> usize {
        self.entries.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the cache capacity for monitoring purposes
    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .map(|cache| cache.cap().get())
            .unwrap_or(0)
    }

    /// Clears all cache entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.lock() {
            cache.clear();
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

impl CacheStore for MemoryCache {
    #[instrument(skip(self, key), fields(key = %redact_api_key(key)))]
    fn get(&self, key: &str) -> Option<ApiResponse> {
        let Ok(mut cache) = self.entries.lock() else {
            warn!("Memory cache lock poisoned, treating as miss");
            return None;
        };

        let expired = match cache.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!("Cache hit: age={:?}", entry.cached_at.elapsed());
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Removing expired cache entry");
            cache.pop(key);
        } else {
            debug!("Cache miss");
        }
        None
    }

    #[instrument(skip(self, key, value), fields(key = %redact_api_key(key)))]
    fn set(&self, key: &str, value: ApiResponse, ttl_seconds: u64) -> bool {
        let Ok(mut cache) = self.entries.lock() else {
            warn!("Memory cache lock poisoned, refusing write");
            return false;
        };
        cache.put(key.to_string(), CachedResponse::new(value, ttl_seconds));
        info!("Cached response: ttl={}s, entries={}", ttl_seconds, cache.len());
        true
    }
}
