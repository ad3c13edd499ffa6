//! Per-callable bounded result cache.
//!
//! ```text
//!   get_or_insert_with(key, compute):
//!
//!     key present? ── yes ──► clone stored result (compute NOT called)
//!          │
//!          no
//!          ▼
//!     result = compute()            ── Err / panic ──► cache untouched
//!          │
//!          ▼
//!     push (key, result) to back
//!          │
//!          ▼
//!     len > max_keys? ── yes ──► drop exactly one entry from the front
//!          │
//!          ▼
//!     return result
//! ```
//!
//! A hit never moves an entry: eviction order is insertion order.

use tracing::{debug, trace};

use crate::builder::MemoConfig;
use crate::error::ConfigError;
use crate::key::CacheKey;
use crate::policy::fifo::FifoCache;
use crate::traits::{CoreCache, FifoCacheTrait, ReadOnlyCache};

#[cfg(feature = "metrics")]
use crate::metrics::{
    CoreMetricsRecorder, MemoMetrics, MemoMetricsRecorder, MemoMetricsSnapshot,
    MetricsSnapshotProvider,
};

/// Bounded map from [`CacheKey`] to a computed result.
///
/// Holds at most `max_keys` results and evicts the oldest one when a new
/// result would exceed the bound.
///
/// # Example
///
/// ```
/// use memokit::key::{CacheKey, CallKey};
/// use memokit::memo::MemoCache;
///
/// let mut cache = MemoCache::new(2).unwrap();
/// let mut calls = 0;
///
/// for _ in 0..3 {
///     let v = cache.get_or_insert_with((1, 2).cache_key(), || {
///         calls += 1;
///         3
///     });
///     assert_eq!(v, 3);
/// }
/// assert_eq!(calls, 1);
/// ```
pub struct MemoCache<R> {
    entries: FifoCache<CacheKey, R>,
    #[cfg(feature = "metrics")]
    metrics: MemoMetrics,
}

impl<R> MemoCache<R> {
    /// Creates an empty cache holding at most `max_keys` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize) -> Result<Self, ConfigError> {
        Self::with_config(&MemoConfig::new(max_keys))
    }

    /// Creates an empty cache from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn with_config(config: &MemoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: &MemoConfig) -> Self {
        Self {
            entries: FifoCache::with_prealloc(config.max_keys, config.prealloc),
            #[cfg(feature = "metrics")]
            metrics: MemoMetrics::new(),
        }
    }

    /// Looks up a stored result, counting the lookup as a hit or a miss.
    pub fn lookup(&mut self, key: &CacheKey) -> Option<&R> {
        let found = self.entries.peek(key);

        #[cfg(feature = "metrics")]
        {
            if found.is_some() {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        found
    }

    /// Returns the stored result for `key`, or computes, stores and
    /// returns it.
    ///
    /// `compute` runs only on a miss. If it panics the cache is left as it
    /// was.
    pub fn get_or_insert_with<F>(&mut self, key: CacheKey, compute: F) -> R
    where
        R: Clone,
        F: FnOnce() -> R,
    {
        if let Some(hit) = self.lookup(&key).cloned() {
            trace!(key = ?key, "memo hit");
            return hit;
        }

        debug!(key = ?key, "memo miss, computing");
        let result = compute();
        self.store(key, result.clone());
        result
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for fallible
    /// computations.
    ///
    /// An `Err` is returned to the caller unchanged and nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` returns.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::key::CallKey;
    /// use memokit::memo::MemoCache;
    ///
    /// let mut cache: MemoCache<i32> = MemoCache::new(4).unwrap();
    /// let key = (10, 0).cache_key();
    ///
    /// let err = cache.try_get_or_insert_with(key.clone(), || Err("division by zero"));
    /// assert_eq!(err, Err("division by zero"));
    /// assert!(!cache.contains(&key));
    /// ```
    pub fn try_get_or_insert_with<E, F>(&mut self, key: CacheKey, compute: F) -> Result<R, E>
    where
        R: Clone,
        F: FnOnce() -> Result<R, E>,
    {
        if let Some(hit) = self.lookup(&key).cloned() {
            trace!(key = ?key, "memo hit");
            return Ok(hit);
        }

        debug!(key = ?key, "memo miss, computing");
        match compute() {
            Ok(result) => {
                self.store(key, result.clone());
                Ok(result)
            },
            Err(err) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_compute_error();
                debug!(key = ?key, "computation failed, nothing cached");
                Err(err)
            },
        }
    }

    /// Stores a result computed outside the cache, evicting the oldest
    /// entry on overflow. Does not count a lookup.
    pub(crate) fn insert_computed(&mut self, key: CacheKey, value: R) {
        debug!(key = ?key, "storing computed result");
        self.store(key, value);
    }

    fn store(&mut self, key: CacheKey, value: R) {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if let Some((evicted, _)) = self.entries.insert_evicting(key, value) {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            debug!(
                evicted = ?evicted,
                max_keys = self.max_keys(),
                "evicted oldest memo entry"
            );
        }
    }

    /// Key that the next overflowing insert will evict.
    pub fn next_eviction(&self) -> Option<&CacheKey> {
        self.entries.peek_oldest().map(|(key, _)| key)
    }

    /// Returns a stored result without counting a lookup.
    #[inline]
    pub fn get(&self, key: &CacheKey) -> Option<&R> {
        self.entries.peek(key)
    }

    /// Returns `true` if a result is stored for `key`.
    #[inline]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains(key)
    }

    /// Number of stored results.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured bound.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.entries.capacity()
    }

    /// Stored keys from oldest to newest (next to be evicted first).
    pub fn keys(&self) -> impl Iterator<Item = &CacheKey> + '_ {
        self.entries.keys()
    }

    /// Stored entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&CacheKey, &R)> + '_ {
        self.entries.iter()
    }

    /// Drops every stored result.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.entries.clear();
    }

    /// Copies the current counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> MemoMetricsSnapshot {
        self.metrics.snapshot_with(self.len(), self.max_keys())
    }
}

#[cfg(feature = "metrics")]
impl<R> MetricsSnapshotProvider<MemoMetricsSnapshot> for MemoCache<R> {
    fn snapshot(&self) -> MemoMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<R> std::fmt::Debug for MemoCache<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoCache")
            .field("max_keys", &self.max_keys())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
