//! Capacity- and age-bounded cache used by discovery and dictionary loading.
//!
//! Entries are evicted in least-recently-used order once the capacity is
//! reached, and independently expire a fixed time after insertion. Reading an
//! entry refreshes its LRU position but never its age.

use std::{
    hash::Hash,
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use lru::LruCache;

/// Source of the current time for cache expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a handle kept by a test can advance the
/// clock seen by a cache it was handed to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_millis: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.elapsed_millis.load(Ordering::SeqCst))
    }
}

struct Stamped<V> {
    value: V,
    inserted_at: Instant,
}

/// LRU cache whose entries also expire `max_age` after insertion.
pub struct ExpiringLru<K: Hash + Eq, V, C: Clock = SystemClock> {
    entries: LruCache<K, Stamped<V>>,
    max_age: Duration,
    clock: C,
}

impl<K: Hash + Eq, V, C: Clock> ExpiringLru<K, V, C> {
    pub fn new(capacity: NonZeroUsize, max_age: Duration, clock: C) -> Self {
        Self {
            entries: LruCache::new(capacity),
            max_age,
            clock,
        }
    }

    /// Look up a live entry, dropping it first if it has outlived `max_age`.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        let expired = self
            .entries
            .peek(key)
            .is_some_and(|entry| now.saturating_duration_since(entry.inserted_at) >= self.max_age);
        if expired {
            self.entries.pop(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    /// Insert or replace an entry, restarting its age.
    pub fn insert(&mut self, key: K, value: V) {
        let inserted_at = self.clock.now();
        self.entries.put(key, Stamped { value, inserted_at });
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.pop(key).map(|entry| entry.value)
    }

    /// Number of stored entries, including ones that have expired but not
    /// yet been read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a configured capacity into the non-zero form `lru` requires.
pub fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}
