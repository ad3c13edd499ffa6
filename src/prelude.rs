pub use crate::builder::{MemoBuilder, MemoConfig};
pub use crate::error::ConfigError;
pub use crate::key::{ByDebug, ByRepr, CacheKey, Call, CallKey, CanonicalKey, Kwargs, Normalize};
pub use crate::memo::{
    memoize, memoize_recursive, try_memoize, MemoCache, Memoized, RecursiveMemoized, Registry,
    TryMemoized,
};
#[cfg(feature = "concurrency")]
pub use crate::memo::{memoize_sync, SyncMemoized};
#[cfg(feature = "metrics")]
pub use crate::metrics::{MemoMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::fifo::FifoCache;
pub use crate::traits::{CoreCache, FifoCacheTrait, ReadOnlyCache};
