//! Memoizing wrappers around callables.
//!
//! A wrapper owns the callable and its [`MemoCache`]. Two wrappers never
//! share a cache, even when they wrap the same function with the same
//! bound.

use std::fmt;
use std::marker::PhantomData;

use crate::builder::MemoConfig;
use crate::error::ConfigError;
use crate::key::CallKey;
use crate::memo::cache::MemoCache;

/// An infallible callable wrapped with a bounded FIFO result cache.
///
/// The callable receives its arguments exactly as the caller passed them;
/// the cache key is derived from those arguments through [`CallKey`]
/// before the call.
///
/// # Example
///
/// ```
/// use memokit::memo::memoize;
///
/// let mut calls = 0;
/// let mut sub = memoize(2, |(x, y): (i32, i32)| {
///     calls += 1;
///     x - y
/// })
/// .unwrap();
///
/// assert_eq!(sub.call((5, 3)), 2);
/// assert_eq!(sub.call((5, 3)), 2); // hit
/// assert_eq!(sub.call((3, 5)), -2); // positional order matters
/// drop(sub);
/// assert_eq!(calls, 2);
/// ```
pub struct Memoized<A, R, F> {
    func: F,
    cache: MemoCache<R>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F> Memoized<A, R, F>
where
    A: CallKey,
    R: Clone,
    F: FnMut(A) -> R,
{
    /// Wraps `func` with a cache of at most `max_keys` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize, func: F) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(MemoCache::new(max_keys)?, func))
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
        let key = args.cache_key();
        let func = &mut self.func;
        self.cache.get_or_insert_with(key, || func(args))
    }
}

impl<A, R, F> Memoized<A, R, F> {
    /// Read-only view of the cache.
    #[inline]
    pub fn cache(&self) -> &MemoCache<R> {
        &self.cache
    }

    /// Unwraps the callable, dropping the cache.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<A, R, F> fmt::Debug for Memoized<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// A fallible callable wrapped with a bounded FIFO result cache.
///
/// Only `Ok` results are cached. An `Err` reaches the caller unchanged and
/// leaves the cache exactly as it was.
///
/// # Example
///
/// ```
/// use memokit::memo::try_memoize;
///
/// let mut div = try_memoize(4, |(a, b): (i32, i32)| {
///     if b == 0 {
///         Err("division by zero")
///     } else {
///         Ok(a / b)
///     }
/// })
/// .unwrap();
///
/// assert_eq!(div.call((10, 2)), Ok(5));
/// assert_eq!(div.call((10, 0)), Err("division by zero"));
/// assert_eq!(div.cache().len(), 1);
/// ```
pub struct TryMemoized<A, T, E, F> {
    func: F,
    cache: MemoCache<T>,
    _args: PhantomData<fn(A) -> E>,
}

impl<A, T, E, F> TryMemoized<A, T, E, F>
where
    A: CallKey,
    T: Clone,
    F: FnMut(A) -> Result<T, E>,
{
    /// Wraps `func` with a cache of at most `max_keys` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize, func: F) -> Result<Self, ConfigError> {
        Ok(Self::from_parts(MemoCache::new(max_keys)?, func))
    }

    pub(crate) fn from_parts(cache: MemoCache<T>, func: F) -> Self {
        Self {
            func,
            cache,
            _args: PhantomData,
        }
    }

    /// Calls the wrapped function, or returns the cached success for
    /// equal arguments.
    ///
    /// # Errors
    ///
    /// Returns the wrapped function's error unchanged.
    pub fn call(&mut self, args: A) -> Result<T, E> {
        let key = args.cache_key();
        let func = &mut self.func;
        self.cache.try_get_or_insert_with(key, || func(args))
    }
}

impl<A, T, E, F> TryMemoized<A, T, E, F> {
    /// Read-only view of the cache.
    #[inline]
    pub fn cache(&self) -> &MemoCache<T> {
        &self.cache
    }

    /// Unwraps the callable, dropping the cache.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<A, T, E, F> fmt::Debug for TryMemoized<A, T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMemoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Wraps an infallible callable with a cache of at most `max_keys` results.
///
/// # Errors
///
/// Returns [`ConfigError`] if `max_keys` is zero.
pub fn memoize<A, R, F>(max_keys: usize, func: F) -> Result<Memoized<A, R, F>, ConfigError>
where
    A: CallKey,
    R: Clone,
    F: FnMut(A) -> R,
{
    Memoized::new(max_keys, func)
}

/// Wraps a fallible callable with a cache of at most `max_keys` results.
///
/// # Errors
///
/// Returns [`ConfigError`] if `max_keys` is zero.
pub fn try_memoize<A, T, E, F>(
    max_keys: usize,
    func: F,
) -> Result<TryMemoized<A, T, E, F>, ConfigError>
where
    A: CallKey,
    T: Clone,
    F: FnMut(A) -> Result<T, E>,
{
    TryMemoized::new(max_keys, func)
}
