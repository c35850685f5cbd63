//! Request metrics for exchange monitoring.
//!
//! A passive observer: counters are recorded after a result has been
//! produced and sent, never on the request path's critical decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Exchange API metrics.
pub struct Metrics {
    /// Total exchange requests handled.
    pub requests_total: AtomicU64,
    /// Requests answered with a success status.
    pub requests_ok: AtomicU64,
    /// Requests answered with an error status.
    pub requests_error: AtomicU64,
    /// Exchange attempts that settled.
    pub exchanges_settled: AtomicU64,
    /// Exchange attempts that produced a failure result.
    pub exchanges_failed: AtomicU64,
}

impl Metrics {
    /// Create new metrics instance.
    pub fn new() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            requests_ok: AtomicU64::new(0),
            requests_error: AtomicU64::new(0),
            exchanges_settled: AtomicU64::new(0),
            exchanges_failed: AtomicU64::new(0),
        }
    }

    /// Record a settled exchange.
    pub fn exchange_settled(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_ok.fetch_add(1, Ordering::Relaxed);
        self.exchanges_settled.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an exchange that produced a failure result.
    pub fn exchange_failed(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_error.fetch_add(1, Ordering::Relaxed);
        self.exchanges_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an exchange request rejected without a result.
    pub fn exchange_rejected(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
        self.requests_error.fetch_add(1, Ordering::Relaxed);
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        format!(
            r#"# HELP cambio_requests_total Total exchange requests handled
# TYPE cambio_requests_total counter
cambio_requests_total {}

# HELP cambio_requests_ok Requests answered with a success status
# TYPE cambio_requests_ok counter
cambio_requests_ok {}

# HELP cambio_requests_error Requests answered with an error status
# TYPE cambio_requests_error counter
cambio_requests_error {}

# HELP cambio_exchanges_settled Exchange attempts that settled
# TYPE cambio_exchanges_settled counter
cambio_exchanges_settled {}

# HELP cambio_exchanges_failed Exchange attempts that produced a failure result
# TYPE cambio_exchanges_failed counter
cambio_exchanges_failed {}
"#,
            self.requests_total.load(Ordering::Relaxed),
            self.requests_ok.load(Ordering::Relaxed),
            self.requests_error.load(Ordering::Relaxed),
            self.exchanges_settled.load(Ordering::Relaxed),
            self.exchanges_failed.load(Ordering::Relaxed),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics instance.
pub type SharedMetrics = Arc<Metrics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_outcome() {
        let metrics = Metrics::new();

        metrics.exchange_settled();
        metrics.exchange_settled();
        metrics.exchange_failed();
        metrics.exchange_rejected();

        assert_eq!(metrics.requests_total.load(Ordering::Relaxed), 4);
        assert_eq!(metrics.requests_ok.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.requests_error.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.exchanges_settled.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.exchanges_failed.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn prometheus_export_carries_counts() {
        let metrics = Metrics::new();
        metrics.exchange_settled();

        let output = metrics.to_prometheus();
        assert!(output.contains("cambio_requests_total 1"));
        assert!(output.contains("cambio_exchanges_settled 1"));
    }
}
