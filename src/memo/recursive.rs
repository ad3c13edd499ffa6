//! Memoization for functions that call themselves.
//!
//! The wrapped function receives a `recurse` handle as its first argument.
//! Every call made through that handle is looked up in, and stored into,
//! the same bounded cache as the outer call.
//!
//! ```text
//!   fib(5)
//!   ├─ recurse(4)  lookup ─ miss ─► fib(4) ─► store
//!   │  ├─ recurse(3) ...
//!   │  └─ recurse(2) ...
//!   └─ recurse(3)  lookup ─ hit
//!   store fib(5)
//! ```
//!
//! A nested call may evict entries; each store still evicts at most one.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::builder::MemoConfig;
use crate::error::ConfigError;
use crate::key::CallKey;
use crate::memo::cache::MemoCache;

/// Looks `args` up in `cache`, computing it with `func` on a miss. Nested
/// calls made through the `recurse` handle come back through here.
pub(crate) fn call_recursive<A, R, F>(cache: &mut MemoCache<R>, func: &F, args: A) -> R
where
    A: CallKey,
    R: Clone,
    F: Fn(&mut dyn FnMut(A) -> R, A) -> R,
{
    let key = args.cache_key();
    if let Some(hit) = cache.lookup(&key).cloned() {
        trace!(key = ?key, "memo hit");
        return hit;
    }

    let result = {
        let mut recurse = |inner: A| call_recursive(&mut *cache, func, inner);
        func(&mut recurse, args)
    };
    cache.insert_computed(key, result.clone());
    result
}

/// A self-recursive function wrapped with a bounded FIFO result cache.
///
/// # Example
///
/// ```
/// use memokit::memo::memoize_recursive;
///
/// let mut fib = memoize_recursive(128, |recurse, (n,): (u64,)| {
///     if n < 2 { n } else { recurse((n - 1,)) + recurse((n - 2,)) }
/// })
/// .unwrap();
///
/// assert_eq!(fib.call((80,)), 23_416_728_348_467_685);
/// assert_eq!(fib.cache().len(), 81);
/// ```
pub struct RecursiveMemoized<A, R, F> {
    func: F,
    cache: MemoCache<R>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F> RecursiveMemoized<A, R, F>
where
    A: CallKey,
    R: Clone,
    F: Fn(&mut dyn FnMut(A) -> R, A) -> R,
{
    /// Wraps `func` with a cache of at most `max_keys` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize, func: F) -> Result<Self, ConfigError> {
        Self::with_config(&MemoConfig::new(max_keys), func)
    }

    /// Wraps `func` using a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn with_config(config: &MemoConfig, func: F) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(MemoCache::with_config(config)?, func))
    }

    pub(crate) fn from_parts(cache: MemoCache<R>, func: F) -> Self {
        Self {
            func,
            cache,
            _args: PhantomData,
        }
    }

    /// Calls the wrapped function, or returns the cached result for
    /// equal arguments.
    pub fn call(&mut self, args: A) -> R {
        call_recursive(&mut self.cache, &self.func, args)
    }
}

impl<A, R, F> RecursiveMemoized<A, R, F> {
    /// Read-only view of the cache.
    #[inline]
    pub fn cache(&self) -> &MemoCache<R> {
        &self.cache
    }
}

impl<A, R, F> fmt::Debug for RecursiveMemoized<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecursiveMemoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Wraps a self-recursive function with a cache of at most `max_keys`
/// results.
///
/// # Errors
///
/// Returns [`ConfigError`] if `max_keys` is zero.
pub fn memoize_recursive<A, R, F>(
    max_keys: usize,
    func: F,
) -> Result<RecursiveMemoized<A, R, F>, ConfigError>
where
    A: CallKey,
    R: Clone,
    F: Fn(&mut dyn FnMut(A) -> R, A) -> R,
{
    RecursiveMemoized::new(max_keys, func)
}
