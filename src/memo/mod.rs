//! Memoization on top of the FIFO policy.
//!
//! ## Architecture
//!
//! ```text
//!   caller args ──► CallKey::cache_key() ──► CacheKey
//!                                              │
//!                  ┌───────────────────────────┘
//!                  ▼
//!   ┌─────────────────────────────────────────────────────────┐
//!   │ MemoCache<R>                                            │
//!   │   FifoCache<CacheKey, R>   (bounded, insertion order)   │
//!   │   MemoMetrics              (feature = "metrics")        │
//!   └─────────────────────────────────────────────────────────┘
//!                  ▲               ▲                ▲
//!                  │               │                │
//!        Memoized / TryMemoized  SyncMemoized     Registry
//!        RecursiveMemoized       (Mutex, shared)  (one cache per name)
//!        (&mut self, one owner)
//! ```
//!
//! ## Flavours
//!
//! | Type             | Call receiver | Callable            | Errors cached |
//! |------------------|---------------|---------------------|---------------|
//! | [`Memoized`]     | `&mut self`   | `FnMut(A) -> R`     | n/a           |
//! | [`TryMemoized`]  | `&mut self`   | `FnMut(A) -> Result`| never         |
//! | [`RecursiveMemoized`] | `&mut self` | `Fn(recurse, A) -> R` | n/a      |
//! | [`SyncMemoized`] | `&self`       | `Fn(A) -> R`        | n/a           |
//! | [`Registry`]     | `&mut self`   | `FnOnce(A) -> R`    | never         |
//!
//! `Memoized` and `TryMemoized` are not thread-safe; share a
//! `SyncMemoized` instead (requires the `concurrency` feature).
//!
//! A function that calls itself should go through [`memoize_recursive`]
//! (or [`Registry::call_recursive`]) so nested calls share the cache. A
//! `SyncMemoized` stored in a `static` may also be called from inside its
//! own callable.

mod cache;
mod recursive;
mod registry;
#[cfg(feature = "concurrency")]
mod sync;
mod wrap;

pub use cache::MemoCache;
pub use recursive::{memoize_recursive, RecursiveMemoized};
pub use registry::Registry;
#[cfg(feature = "concurrency")]
pub use sync::{memoize_sync, SyncMemoized};
pub use wrap::{memoize, try_memoize, Memoized, TryMemoized};
