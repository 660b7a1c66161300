pub mod gateway;
pub mod memory;
pub mod types;

use crate::models::ApiResponse;

// Re-export cache types
pub use gateway::CacheGateway;
pub use memory::MemoryCache;
pub use types::CachedResponse;

/// Key/value store with TTL used to keep decoded responses between calls.
///
/// Keys are full request URLs. `set` reports whether the value was accepted.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<ApiResponse>;

    fn set(&self, key: &str, value: ApiResponse, ttl_seconds: u64) -> bool;
}
