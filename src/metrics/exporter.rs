use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::MemoMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for memo metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
/// Write failures are ignored: metrics are observational.
///
/// # Example
///
/// ```
/// use memokit::memo::memoize;
/// use memokit::metrics::{MetricsExporter, PrometheusTextExporter};
///
/// let mut square = memoize(4, |(x,): (u64,)| x * x).unwrap();
/// square.call((3,));
/// square.call((3,));
///
/// let exporter = PrometheusTextExporter::new("square", Vec::new());
/// exporter.export(&square.cache().metrics_snapshot());
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("square_get_hits_total 1"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_metric("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        self.write_metric("gauge", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<MemoMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &MemoMetricsSnapshot) {
        self.write_counter(&self.metric_name("get_calls_total"), snapshot.get_calls);
        self.write_counter(&self.metric_name("get_hits_total"), snapshot.get_hits);
        self.write_counter(&self.metric_name("get_misses_total"), snapshot.get_misses);
        self.write_counter(&self.metric_name("insert_new_total"), snapshot.insert_new);
        self.write_counter(
            &self.metric_name("evicted_entries_total"),
            snapshot.evicted_entries,
        );
        self.write_counter(
            &self.metric_name("compute_errors_total"),
            snapshot.compute_errors,
        );
        self.write_counter(&self.metric_name("clears_total"), snapshot.clears);
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(&self.metric_name("max_keys"), snapshot.max_keys as u64);
    }
}
