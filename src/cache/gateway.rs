use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::CacheStore;
use crate::api::urls::redact_api_key;
use crate::error::AppError;
use crate::models::ApiResponse;

/// Mediates between the request pipeline and an optional cache store.
///
/// Reads happen whenever a store is configured. Writes happen only when the TTL
/// is positive, so a store with `cache_time = 0` is read-only.
#[derive(Clone, Default)]
pub struct CacheGateway {
    store: Option<Arc<dyn CacheStore>>,
    ttl_seconds: u64,
}

impl CacheGateway {
    pub fn new(store: Option<Arc<dyn CacheStore>>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Whether a decoded response should be written back
    pub fn writes_enabled(&self) -> bool {
        self.store.is_some() && self.ttl_seconds > 0
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Looks up a previously stored response. Empty stored values count as misses.
    #[instrument(skip(self, key), fields(key = %redact_api_key(key)))]
    pub fn try_get(&self, key: &str) -> Option<ApiResponse> {
        let store = self.store.as_ref()?;
        match store.get(key) {
            Some(value) if !value.is_empty() => {
                debug!("Using cached response");
                Some(value)
            }
            Some(_) => {
                debug!("Cached value is empty, treating as miss");
                None
            }
            None => None,
        }
    }

    /// Stores a decoded response under `key` when writes are enabled.
    ///
    /// A refused write is an error: the caller asked for persistence and did
    /// not get it.
    #[instrument(skip(self, key, value), fields(key = %redact_api_key(key)))]
    pub fn store(&self, key: &str, value: &ApiResponse) -> Result<(), AppError> {
        let Some(store) = self.store.as_ref().filter(|_| self.ttl_seconds > 0) else {
            return Ok(());
        };

        if store.set(key, value.clone(), self.ttl_seconds) {
            debug!("Stored response with ttl={}s", self.ttl_seconds);
            Ok(())
        } else {
            error!("Cache store refused write");
            Err(AppError::cache_error(
                format!("Failed to store response in cache (ttl {}s)", self.ttl_seconds),
                key,
            ))
        }
    }
}
