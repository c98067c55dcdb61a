//! Single-entry TTL cache.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};

/// The last successful response and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub fetched_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Fresh iff strictly less than `duration` has elapsed since the fetch.
    pub fn is_fresh(&self, now: Instant, duration: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < duration
    }
}

/// Holds at most one value, served for `duration` after it was set.
///
/// All access goes through one mutex, so overlapping `get`/`set` calls
/// never observe a half-written entry. The lock is never held across an
/// `.await`; fetching is the caller's job.
pub struct ResponseCache<T> {
    entry: Mutex<Option<CacheEntry<T>>>,
    duration: Duration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(duration: Duration) -> Self {
        Self::with_clock(duration, Arc::new(SystemClock))
    }

    pub fn with_clock(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: Mutex::new(None),
            duration,
            clock,
        }
    }

    /// The cached value if it is still inside the window.
    pub fn get(&self) -> Option<T> {
        let now = self.clock.now();
        self.lock()
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.duration))
            .map(|entry| entry.value.clone())
    }

    /// Replace the entry and stamp it with the current time.
    pub fn set(&self, value: T) {
        let fetched_at = self.clock.now();
        *self.lock() = Some(CacheEntry { value, fetched_at });
    }

    /// Drop the entry unconditionally.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// The stored entry, fresh or not.
    pub fn entry(&self) -> Option<CacheEntry<T>> {
        self.lock().clone()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    // The guarded value is a plain Option; a panic elsewhere cannot leave
    // it half-updated, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, Option<CacheEntry<T>>> {
        self.entry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T> std::fmt::Debug for ResponseCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
