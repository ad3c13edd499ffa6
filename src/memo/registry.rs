//! Named per-callable caches.
//!
//! A [`Registry`] is an explicit owner for the caches of several callables
//! that share a configuration. Each name gets its own [`MemoCache`],
//! created on first use, so callables registered under different names
//! never see each other's results even for equal arguments.
//!
//! ```text
//!   Registry
//!   ┌──────────────────────────────────────────────┐
//!   │  config: MemoConfig (validated once)         │
//!   │                                              │
//!   │  "sum_of_numbers" ──► MemoCache [k1, k2]     │
//!   │  "matrix_total"   ──► MemoCache [k3]         │
//!   └──────────────────────────────────────────────┘
//! ```

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::builder::MemoConfig;
use crate::error::ConfigError;
use crate::key::CallKey;
use crate::memo::cache::MemoCache;
use crate::memo::recursive::call_recursive;

/// Owner of one bounded cache per named callable.
///
/// # Example
///
/// ```
/// use memokit::memo::Registry;
///
/// let mut registry = Registry::new(2).unwrap();
///
/// let add = |(a, b): (i64, i64)| a + b;
/// let mul = |(a, b): (i64, i64)| a * b;
///
/// assert_eq!(registry.call("add", (3, 4), add), 7);
/// assert_eq!(registry.call("mul", (3, 4), mul), 12);
/// assert_eq!(registry.call("add", (3, 4), add), 7); // hit
///
/// assert_eq!(registry.cache("add").map(|c| c.len()), Some(1));
/// assert_eq!(registry.len(), 2);
/// ```
pub struct Registry<R> {
    config: MemoConfig,
    caches: FxHashMap<&'static str, MemoCache<R>>,
}

impl<R> Registry<R> {
    /// Creates an empty registry whose caches hold at most `max_keys`
    /// results each.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn new(max_keys: usize) -> Result<Self, ConfigError> {
        Self::with_config(MemoConfig::new(max_keys))
    }

    /// Creates an empty registry from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn with_config(config: MemoConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            caches: FxHashMap::default(),
        })
    }

    fn cache_mut(&mut self, name: &'static str) -> &mut MemoCache<R> {
        let config = &self.config;
        self.caches.entry(name).or_insert_with(|| {
            debug!(callable = name, max_keys = config.max_keys, "created memo cache");
            MemoCache::from_validated(config)
        })
    }

    /// Calls `func` through the cache registered under `name`.
    ///
    /// The cache is created on the first call for `name`.
    pub fn call<A, F>(&mut self, name: &'static str, args: A, func: F) -> R
    where
        A: CallKey,
        R: Clone,
        F: FnOnce(A) -> R,
    {
        let key = args.cache_key();
        self.cache_mut(name)
            .get_or_insert_with(key, move || func(args))
    }

    /// Calls a fallible `func` through the cache registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `func`'s error unchanged; nothing is cached for it.
    pub fn try_call<A, E, F>(&mut self, name: &'static str, args: A, func: F) -> Result<R, E>
    where
        A: CallKey,
        R: Clone,
        F: FnOnce(A) -> Result<R, E>,
    {
        let key = args.cache_key();
        self.cache_mut(name)
            .try_get_or_insert_with(key, move || func(args))
    }

    /// Calls a self-recursive `func` through the cache registered under
    /// `name`. Calls made through the `recurse` handle share that cache.
    ///
    /// ```
    /// use memokit::memo::Registry;
    ///
    /// let mut registry = Registry::new(16).unwrap();
    /// let fib = |recurse: &mut dyn FnMut((u64,)) -> u64, (n,): (u64,)| {
    ///     if n < 2 { n } else { recurse((n - 1,)) + recurse((n - 2,)) }
    /// };
    /// assert_eq!(registry.call_recursive("fib", (10,), &fib), 55);
    /// assert_eq!(registry.cache("fib").map(|c| c.len()), Some(11));
    /// ```
    pub fn call_recursive<A, F>(&mut self, name: &'static str, args: A, func: &F) -> R
    where
        A: CallKey,
        R: Clone,
        F: Fn(&mut dyn FnMut(A) -> R, A) -> R,
    {
        call_recursive(self.cache_mut(name), func, args)
    }

    /// Returns the cache registered under `name`, if it has been used.
    pub fn cache(&self, name: &str) -> Option<&MemoCache<R>> {
        self.caches.get(name)
    }

    /// Names with a cache, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.caches.keys().copied()
    }

    /// Drops every result stored under `name`. The cache itself stays.
    pub fn clear(&mut self, name: &str) {
        if let Some(cache) = self.caches.get_mut(name) {
            cache.clear();
        }
    }

    /// Number of named caches.
    #[inline]
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Returns `true` if no callable has been used yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    /// Bound applied to every cache in the registry.
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.config.max_keys
    }
}

impl<R> std::fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("max_keys", &self.config.max_keys)
            .field("callables", &self.caches.len())
            .finish()
    }
}
