use crate::ErrorKind;
use ::metrics::{register_counter, register_histogram, Counter, Histogram};
use std::time::Duration;

/// Fetch pipeline instrumentation
///
/// Handles are registered against whatever recorder is installed when the
/// client is built; with no recorder every call is a no-op.
pub struct Metrics {
    fetches_started: Counter,
    fetches_succeeded: Counter,
    fetch_duration: Histogram,
    bytes_read: Counter,
    bulk_batches: Counter,
    bulk_cancellations: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            fetches_started: register_counter!("metagrab_fetches_started_total"),
            fetches_succeeded: register_counter!("metagrab_fetches_succeeded_total"),
            fetch_duration: register_histogram!("metagrab_fetch_duration_seconds"),
            bytes_read: register_counter!("metagrab_bytes_read_total"),
            bulk_batches: register_counter!("metagrab_bulk_batches_total"),
            bulk_cancellations: register_counter!("metagrab_bulk_cancellations_total"),
        }
    }

    pub fn record_start(&self) {
        self.fetches_started.increment(1);
    }

    pub fn record_fetch(&self, duration: Duration, bytes: usize) {
        self.fetches_succeeded.increment(1);
        self.bytes_read.increment(bytes as u64);
        self.fetch_duration.record(duration.as_secs_f64());
    }

    pub fn record_error(&self, kind: ErrorKind) {
        ::metrics::increment_counter!("metagrab_fetch_failures_total", "kind" => kind.as_str());
    }

    pub fn record_bulk(&self, cancelled: bool) {
        self.bulk_batches.increment(1);
        if cancelled {
            self.bulk_cancellations.increment(1);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
