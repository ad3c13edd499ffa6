//! # Metrics Trait Hierarchy
//!
//! Separates *recording*, *snapshotting* and *export* into small traits so
//! the memo cache only ever writes counters.
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit/get_miss/insert    │
//!                  │  evict/clear                │
//!                  └──────────────┬──────────────┘
//!                                 │
//!                                 ▼
//!                  ┌─────────────────────────────┐
//!                  │     MemoMetricsRecorder     │
//!                  │  compute_error              │
//!                  └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_new(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to memoized computations.
pub trait MemoMetricsRecorder: CoreMetricsRecorder {
    /// The computation failed on a miss; nothing was stored.
    fn record_compute_error(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
