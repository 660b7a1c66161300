//! Test doubles for the transport and cache store collaborators

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::api::http_client::{Transport, TransportResponse};
use crate::cache::CacheStore;
use crate::models::ApiResponse;

type Outcome = Result<TransportResponse, String>;

#[derive(Default)]
struct Recorded {
    urls: Vec<String>,
    timeout: Option<Duration>,
    source: Option<IpAddr>,
}

/// Transport that replays scripted outcomes and records every invocation.
///
/// Outcomes are consumed in order; the last one repeats once the script runs out.
pub struct StubTransport {
    script: Mutex<VecDeque<Outcome>>,
    last: Mutex<Option<Outcome>>,
    calls: AtomicUsize,
    recorded: Mutex<Recorded>,
}

impl StubTransport {
    pub fn scripted(outcomes: Vec<Outcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// Always answers 200 with `body`
    pub fn ok(body: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(TransportResponse::new(200, body))])
    }

    /// Always answers with `status` and `body`
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(TransportResponse::new(status, body))])
    }

    /// Always fails at the transport level with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(vec![Err(message.into())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.recorded
            .lock()
            .map(|r| r.urls.clone())
            .unwrap_or_default()
    }

    pub fn last_timeout(&self) -> Option<Duration> {
        self.recorded.lock().ok().and_then(|r| r.timeout)
    }

    pub fn last_source(&self) -> Option<IpAddr> {
        self.recorded.lock().ok().and_then(|r| r.source)
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, timeout: Duration, source: Option<IpAddr>) -> Outcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.urls.push(url.to_string());
            recorded.timeout = Some(timeout);
            recorded.source = source;
        }

        let next = self.script.lock().ok().and_then(|mut s| s.pop_front());
        let mut last = self
            .last
            .lock()
            .map_err(|_| "stub transport lock poisoned".to_string())?;
        if let Some(outcome) = next {
            *last = Some(outcome);
        }
        last.clone()
            .unwrap_or_else(|| Err("stub transport has no scripted response".to_string()))
    }
}

/// Cache store backed by a map that counts reads and writes.
pub struct RecordingCache {
    entries: Mutex<HashMap<String, (ApiResponse, u64)>>,
    accept_writes: bool,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            accept_writes: true,
            get_calls: AtomicUsize::new(0),
            set_calls: AtomicUsize::new(0),
        }
    }

    /// A store whose `set` always reports failure
    pub fn refusing_writes() -> Self {
        Self {
            accept_writes: false,
            ..Self::new()
        }
    }

    /// Seeds an entry without counting it as a write
    pub fn preload(&self, key: &str, value: ApiResponse) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (value, 0));
        }
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    /// Stored value and TTL for `key`
    pub fn entry(&self, key: &str) -> Option<(ApiResponse, u64)> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RecordingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore for RecordingCache {
    fn get(&self, key: &str) -> Option<ApiResponse> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .ok()
            .and_then(|e| e.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&self, key: &str, value: ApiResponse, ttl_seconds: u64) -> bool {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if !self.accept_writes {
            return false;
        }
        match self.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), (value, ttl_seconds));
                true
            }
            Err(_) => false,
        }
    }
}
