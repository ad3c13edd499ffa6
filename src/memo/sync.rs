//! Thread-safe memoization.
//!
//! [`SyncMemoized`] keeps its cache behind a `parking_lot::Mutex`, but the
//! lock is released while the callable runs. A miss claims its key in an
//! in-flight set; later callers with the same key wait on a `Condvar`
//! until the claim completes, so equal arguments still compute once.
//! Calls with other keys, including recursive calls from inside the
//! callable, go ahead in the meantime.
//!
//! ```text
//!   call(args):
//!
//!     lock ── hit? ── yes ──► clone, unlock, return
//!              │
//!              no
//!              ▼
//!     key in flight? ── yes ──► wait, re-check
//!              │
//!              no
//!              ▼
//!     claim key, unlock ──► compute ──► lock, insert + evict,
//!                                       release claim, notify
//! ```
//!
//! A panicking callable releases its claim without storing anything.
//! A callable that calls itself with its own arguments waits on itself
//! forever, as that recursion would never terminate anyway.

use std::fmt;
use std::marker::PhantomData;

use parking_lot::{Condvar, Mutex};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::ConfigError;
use crate::key::{CacheKey, CallKey};
use crate::memo::cache::MemoCache;

#[cfg(feature = "metrics")]
use crate::metrics::{MemoMetricsSnapshot, MetricsSnapshotProvider};

struct Shared<R> {
    cache: MemoCache<R>,
    in_flight: FxHashSet<CacheKey>,
}

/// Exclusive right to compute one key. Dropping it without
/// [`complete`](Claim::complete) (e.g. on unwind) only releases the key.
struct Claim<'a, R> {
    state: &'a Mutex<Shared<R>>,
    ready: &'a Condvar,
    key: Option<CacheKey>,
}

impl<R> Claim<'_, R> {
    fn complete(mut self, value: R) {
        if let Some(key) = self.key.take() {
            let mut state = self.state.lock();
            state.in_flight.remove(&key);
            state.cache.insert_computed(key, value);
            drop(state);
            self.ready.notify_all();
        }
    }
}

impl<R> Drop for Claim<'_, R> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.state.lock().in_flight.remove(&key);
            self.ready.notify_all();
        }
    }
}

/// A callable wrapped with a bounded FIFO result cache that may be shared
/// between threads.
///
/// Lookups that wait for another thread's computation of the same key are
/// counted as misses.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::thread;
/// use memokit::memo::SyncMemoized;
///
/// let calls = AtomicUsize::new(0);
/// let square = SyncMemoized::new(8, |(x,): (u64,)| {
///     calls.fetch_add(1, Ordering::SeqCst);
///     x * x
/// })
/// .unwrap();
///
/// thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| assert_eq!(square.call((12,)), 144));
///     }
/// });
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct SyncMemoized<A, R, F> {
    func: F,
    state: Mutex<Shared<R>>,
    ready: Condvar,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F> SyncMemoized<A, R, F>
where
    A: CallKey,
    R: Clone,
    F: Fn(A) -> R,
{
    /// Wraps `func` with a cache of at most `max_keys` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize, func: F) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(MemoCache::new(max_keys)?, func))
    }

    pub(crate) fn from_parts(cache: MemoCache<R>, func: F) -> Self {
        Self {
            func,
            state: Mutex::new(Shared {
                cache,
                in_flight: FxHashSet::default(),
            }),
            ready: Condvar::new(),
            _args: PhantomData,
        }
    }

    /// Calls the wrapped function, or returns the cached result for
    /// equal arguments.
    pub fn call(&self, args: A) -> R {
        let key = args.cache_key();
        let mut state = self.state.lock();

        if let Some(hit) = state.cache.lookup(&key).cloned() {
            return hit;
        }
        while state.in_flight.contains(&key) {
            trace!(key = ?key, "waiting for in-flight computation");
            self.ready.wait(&mut state);
            if let Some(hit) = state.cache.get(&key).cloned() {
                return hit;
            }
        }

        state.in_flight.insert(key.clone());
        drop(state);

        let claim = Claim {
            state: &self.state,
            ready: &self.ready,
            key: Some(key),
        };
        let result = (self.func)(args);
        claim.complete(result.clone());
        result
    }
}

impl<A, R, F> SyncMemoized<A, R, F> {
    /// Runs `f` against the cache while holding the lock.
    pub fn with_cache<T>(&self, f: impl FnOnce(&MemoCache<R>) -> T) -> T {
        f(&self.state.lock().cache)
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.state.lock().cache.is_empty()
    }
}

#[cfg(feature = "metrics")]
impl<A, R, F> MetricsSnapshotProvider<MemoMetricsSnapshot> for SyncMemoized<A, R, F> {
    fn snapshot(&self) -> MemoMetricsSnapshot {
        self.state.lock().cache.metrics_snapshot()
    }
}

impl<A, R, F> fmt::Debug for SyncMemoized<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_lock() {
            Some(state) => f
                .debug_struct("SyncMemoized")
                .field("cache", &state.cache)
                .field("in_flight", &state.in_flight.len())
                .finish_non_exhaustive(),
            None => f
                .debug_struct("SyncMemoized")
                .field("cache", &"<locked>")
                .finish_non_exhaustive(),
        }
    }
}

/// Wraps a callable for concurrent use with a cache of at most `max_keys`
/// results.
///
/// # Errors
///
/// Returns [`ConfigError`] if `max_keys` is zero.
pub fn memoize_sync<A, R, F>(max_keys: usize, func: F) -> Result<SyncMemoized<A, R, F>, ConfigError>
where
    A: CallKey,
    R: Clone,
    F: Fn(A) -> R,
{
    SyncMemoized::new(max_keys, func)
}
