//! memokit: bounded FIFO memoization for arbitrary callables.
//!
//! A memoized callable keeps at most `max_keys` results, keyed on a
//! normalized form of its arguments. When a new result would exceed the
//! bound, the result inserted earliest is dropped. Hits never change the
//! eviction order.
//!
//! ## Layout
//!
//! - [`key`]: argument normalization ([`Normalize`](key::Normalize),
//!   [`CanonicalKey`](key::CanonicalKey)) and call keys
//!   ([`CallKey`](key::CallKey), [`Kwargs`](key::Kwargs)).
//! - [`policy`]: the FIFO store the caches are built on.
//! - [`memo`]: per-callable caches and the memoizing wrappers.
//! - [`builder`]: [`MemoConfig`](builder::MemoConfig) and
//!   [`MemoBuilder`](builder::MemoBuilder).
//! - [`metrics`]: hit/miss/eviction counters (feature `metrics`).
//!
//! ## Example
//!
//! ```
//! use memokit::prelude::*;
//!
//! let mut sum_of_numbers = memoize(2, |(a, b): (i64, i64)| a + b).unwrap();
//!
//! assert_eq!(sum_of_numbers.call((1, 2)), 3);
//! assert_eq!(sum_of_numbers.call((1, 2)), 3); // served from cache
//! assert_eq!(sum_of_numbers.call((3, 4)), 7);
//! assert_eq!(sum_of_numbers.call((5, 6)), 11); // evicts (1, 2)
//!
//! let keys: Vec<_> = sum_of_numbers.cache().keys().cloned().collect();
//! assert_eq!(keys, vec![(3, 4).cache_key(), (5, 6).cache_key()]);
//! ```
//!
//! ## Features
//!
//! - `metrics` (default): per-cache counters and a Prometheus text exporter.
//! - `concurrency` (default): [`SyncMemoized`](memo::SyncMemoized), backed by
//!   `parking_lot`.

pub mod builder;
pub mod error;
pub mod key;
pub mod memo;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use crate::builder::{MemoBuilder, MemoConfig};
pub use crate::error::ConfigError;
pub use crate::key::{CacheKey, CallKey, CanonicalKey, Kwargs, Normalize};
pub use crate::memo::{
    memoize, memoize_recursive, try_memoize, MemoCache, Memoized, RecursiveMemoized, Registry,
    TryMemoized,
};
#[cfg(feature = "concurrency")]
pub use crate::memo::{memoize_sync, SyncMemoized};
pub use crate::policy::fifo::FifoCache;
