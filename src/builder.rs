//! Configuration and builder for memoized callables.
//!
//! [`MemoConfig`] holds the per-wrap settings; [`MemoBuilder`] validates
//! them once and produces any of the memoizer flavours.
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::MemoBuilder;
//!
//! let mut add = MemoBuilder::new(2).build(|(x, y): (i64, i64)| x + y);
//! assert_eq!(add.call((1, 2)), 3);
//! assert_eq!(add.cache().len(), 1);
//! ```
//!
//! ## MemoConfig
//!
//! | Field      | Type    | Default | Description                              |
//! |------------|---------|---------|------------------------------------------|
//! | `max_keys` | `usize` | 128     | Maximum cached results per callable      |
//! | `prealloc` | `bool`  | false   | Reserve room for `max_keys` entries      |

use crate::error::ConfigError;
use crate::key::CallKey;
use crate::memo::{MemoCache, Memoized, RecursiveMemoized, Registry, TryMemoized};

#[cfg(feature = "concurrency")]
use crate::memo::SyncMemoized;

/// Default bound used by [`MemoConfig::default`].
pub const DEFAULT_MAX_KEYS: usize = 128;

/// Settings fixed when a callable is wrapped.
///
/// # Example
///
/// ```
/// use memokit::builder::MemoConfig;
///
/// let config = MemoConfig::default();
/// assert_eq!(config.max_keys, 128);
///
/// let config = MemoConfig {
///     max_keys: 2,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert!(MemoConfig::new(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    /// Maximum number of cached results. Must be at least 1.
    pub max_keys: usize,

    /// Reserve storage for `max_keys` entries at construction.
    ///
    /// Worth enabling for small bounds that are expected to fill up.
    pub prealloc: bool,
}

impl MemoConfig {
    /// Config with the given bound and default options.
    pub fn new(max_keys: usize) -> Self {
        Self {
            max_keys,
            ..Default::default()
        }
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_keys` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_keys == 0 {
            return Err(ConfigError::new("max_keys must be greater than 0"));
        }
        Ok(())
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            max_keys: DEFAULT_MAX_KEYS,
            prealloc: false,
        }
    }
}

/// Builder for memoized callables and their caches.
#[derive(Debug, Clone)]
pub struct MemoBuilder {
    config: MemoConfig,
}

impl MemoBuilder {
    /// Creates a builder with the given `max_keys` bound.
    pub fn new(max_keys: usize) -> Self {
        Self {
            config: MemoConfig::new(max_keys),
        }
    }

    /// Creates a builder from a full configuration.
    pub fn from_config(config: MemoConfig) -> Self {
        Self { config }
    }

    /// Reserve storage for `max_keys` entries up front.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.config.prealloc = prealloc;
        self
    }

    /// Returns the configuration the builder will use.
    pub fn config(&self) -> &MemoConfig {
        &self.config
    }

    /// Builds a standalone cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    pub fn try_build_cache<R>(self) -> Result<MemoCache<R>, ConfigError> {
        MemoCache::with_config(&self.config)
    }

    /// Wraps an infallible callable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    pub fn try_build<A, R, F>(self, func: F) -> Result<Memoized<A, R, F>, ConfigError>
    where
        A: CallKey,
        R: Clone,
        F: FnMut(A) -> R,
    {
        let cache = MemoCache::with_config(&self.config)?;
        Ok(Memoized::from_parts(cache, func))
    }

    /// Wraps an infallible callable.
    ///
    /// # Panics
    ///
    /// Panics on an invalid configuration. Use [`try_build`](Self::try_build)
    /// when the bound comes from user input.
    pub fn build<A, R, F>(self, func: F) -> Memoized<A, R, F>
    where
        A: CallKey,
        R: Clone,
        F: FnMut(A) -> R,
    {
        match self.try_build(func) {
            Ok(memo) => memo,
            Err(e) => panic!("{}", e),
        }
    }

    /// Wraps a fallible callable; errors are returned and never cached.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    pub fn try_build_fallible<A, T, E, F>(
        self,
        func: F,
    ) -> Result<TryMemoized<A, T, E, F>, ConfigError>
    where
        A: CallKey,
        T: Clone,
        F: FnMut(A) -> Result<T, E>,
    {
        let cache = MemoCache::with_config(&self.config)?;
        Ok(TryMemoized::from_parts(cache, func))
    }

    /// Wraps a self-recursive callable; see
    /// [`memoize_recursive`](crate::memo::memoize_recursive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    pub fn try_build_recursive<A, R, F>(
        self,
        func: F,
    ) -> Result<RecursiveMemoized<A, R, F>, ConfigError>
    where
        A: CallKey,
        R: Clone,
        F: Fn(&mut dyn FnMut(A) -> R, A) -> R,
    {
        let cache = MemoCache::with_config(&self.config)?;
        Ok(RecursiveMemoized::from_parts(cache, func))
    }

    /// Wraps a callable for use from several threads at once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    #[cfg(feature = "concurrency")]
    pub fn try_build_sync<A, R, F>(self, func: F) -> Result<SyncMemoized<A, R, F>, ConfigError>
    where
        A: CallKey,
        R: Clone,
        F: Fn(A) -> R,
    {
        let cache = MemoCache::with_config(&self.config)?;
        Ok(SyncMemoized::from_parts(cache, func))
    }

    /// Builds a registry whose per-callable caches share this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an invalid configuration.
    pub fn try_build_registry<R>(self) -> Result<Registry<R>, ConfigError> {
        Registry::with_config(self.config)
    }
}
