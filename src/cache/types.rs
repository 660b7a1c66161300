//! Cache data structures with TTL support

use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::ApiResponse;

/// Cached decoded response with TTL support
#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub data: ApiResponse,
    pub cached_at: Instant,
    pub ttl_seconds: u64,
}

impl CachedResponse {
    /// Creates a new cached response entry
    pub fn new(data: ApiResponse, ttl_seconds: u64) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            ttl_seconds,
        }
    }

    /// Checks if the cached data is expired. A TTL of zero never expires.
    pub fn is_expired(&self) -> bool {
        if self.ttl_seconds == 0 {
            return false;
        }
        let age = self.cached_at.elapsed();
        let is_expired = age > self.get_ttl();

        debug!(
            "Cache expiration check: age={:?}, ttl={}s, is_expired={}",
            age, self.ttl_seconds, is_expired
        );

        is_expired
    }

    /// Gets the TTL duration for this cache entry
    pub fn get_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Duration {
        self.get_ttl().saturating_sub(self.cached_at.elapsed())
    }
}
