//! Short-TTL memoization for idempotent reads.
//!
//! This is a read-through cache, not a coherence layer: entries are
//! never invalidated by writes automatically. Callers that mutate
//! backend state are responsible for evicting the affected keys with
//! [`ResponseCache::clear`] afterwards. Stale entries are logically
//! absent even while physically retained.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;

/// Default entry time-to-live: five minutes.
const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

// ============================================================================
// Cache Entry
// ============================================================================

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

// ============================================================================
// Response Cache
// ============================================================================

/// TTL-bounded memoization of JSON read responses, keyed by
/// caller-supplied strings. Unbounded in entry count.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Creates a cache with the default five-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached payload for `key` if live; otherwise invokes
    /// `op`, stores its payload under `key`, and returns it.
    ///
    /// # Errors
    ///
    /// A failure from `op` is returned as-is and nothing is stored.
    pub async fn get_or_fetch<F, Fut>(&self, key: &str, op: F) -> Result<Value, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, ApiError>>,
    {
        if let Some(value) = self.lookup(key) {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        let value = op().await?;
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Evicts entries. With a pattern, every key containing it as a
    /// substring is removed; without one, everything is.
    pub fn clear(&self, pattern: Option<&str>) {
        let mut entries = self.lock();
        match pattern {
            Some(pattern) => {
                entries.retain(|key, _| !key.contains(pattern));
            }
            None => entries.clear(),
        }
    }

    /// Number of physically retained entries (live or stale).
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
