/// Point-in-time copy of a memo cache's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub evicted_entries: u64,
    pub compute_errors: u64, // misses whose computation returned Err
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub max_keys: usize,
}

impl MemoMetricsSnapshot {
    /// Fraction of lookups served from the cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
