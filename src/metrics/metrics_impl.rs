use crate::metrics::snapshot::MemoMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, MemoMetricsRecorder};

/// Counters kept by a single memo cache.
#[derive(Debug, Default, Clone)]
pub struct MemoMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub evicted_entries: u64,
    pub compute_errors: u64,
    pub clears: u64,
}

impl MemoMetrics {
    pub fn new() -> MemoMetrics {
        Self::default()
    }

    /// Copies the counters, adding gauges captured by the caller.
    pub fn snapshot_with(&self, cache_len: usize, max_keys: usize) -> MemoMetricsSnapshot {
        MemoMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_new: self.insert_new,
            evicted_entries: self.evicted_entries,
            compute_errors: self.compute_errors,
            clears: self.clears,
            cache_len,
            max_keys,
        }
    }
}

impl CoreMetricsRecorder for MemoMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl MemoMetricsRecorder for MemoMetrics {
    fn record_compute_error(&mut self) {
        self.compute_errors += 1;
    }
}
