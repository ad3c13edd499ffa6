//! Hit/miss/eviction accounting for memoized callables.
//!
//! Compiled only with the `metrics` feature.
//!
//! - [`traits`]: recorder, snapshot-provider and exporter traits.
//! - [`metrics_impl::MemoMetrics`]: counters owned by each `MemoCache`.
//! - [`snapshot::MemoMetricsSnapshot`]: point-in-time copy for tests and export.
//! - [`exporter::PrometheusTextExporter`]: Prometheus text exposition.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::MemoMetrics;
pub use snapshot::MemoMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MemoMetricsRecorder, MetricsExporter, MetricsSnapshotProvider};
