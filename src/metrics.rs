//! Metrics collection and reporting for production monitoring
//!
//! Tracks request counts, error rate, and inference latency, exposed in
//! Prometheus format at `GET /metrics`. Counters are lock-free atomics;
//! recording from concurrent handlers needs no coordination.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Central metrics collector shared across handlers
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    /// Total number of prediction requests processed
    total_requests: Arc<AtomicUsize>,
    /// Requests that produced a prediction
    successful_requests: Arc<AtomicUsize>,
    /// Requests rejected or failed
    failed_requests: Arc<AtomicUsize>,
    /// Total inference time in microseconds
    total_inference_time_us: Arc<AtomicU64>,
    /// Start time for rate calculations
    start_time: Instant,
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_requests: Arc::new(AtomicUsize::new(0)),
            successful_requests: Arc::new(AtomicUsize::new(0)),
            failed_requests: Arc::new(AtomicUsize::new(0)),
            total_inference_time_us: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction and its end-to-end latency
    #[allow(clippy::cast_possible_truncation)]
    pub fn record_success(&self, duration: Duration) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.successful_requests.fetch_add(1, Ordering::Relaxed);
        self.total_inference_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record a rejected or failed prediction request
    pub fn record_failure(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current snapshot of metrics
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let successful = self.successful_requests.load(Ordering::Relaxed);
        let failed = self.failed_requests.load(Ordering::Relaxed);
        let total_time_us = self.total_inference_time_us.load(Ordering::Relaxed);
        let uptime = self.start_time.elapsed();

        MetricsSnapshot {
            total_requests,
            successful_requests: successful,
            failed_requests: failed,
            total_inference_time_us: total_time_us,
            uptime_secs: uptime.as_secs(),
            requests_per_sec: if uptime.as_secs() > 0 {
                total_requests as f64 / uptime.as_secs_f64()
            } else {
                0.0
            },
            avg_latency_ms: if successful > 0 {
                (total_time_us as f64 / 1000.0) / successful as f64
            } else {
                0.0
            },
            error_rate: if total_requests > 0 {
                failed as f64 / total_requests as f64
            } else {
                0.0
            },
        }
    }

    /// Export metrics in Prometheus format
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "# HELP catador_requests_total Total prediction requests\n\
             # TYPE catador_requests_total counter\n\
             catador_requests_total {}\n\
             # HELP catador_requests_successful Successful predictions\n\
             # TYPE catador_requests_successful counter\n\
             catador_requests_successful {}\n\
             # HELP catador_requests_failed Failed or rejected requests\n\
             # TYPE catador_requests_failed counter\n\
             catador_requests_failed {}\n\
             # HELP catador_inference_time_seconds Total inference time\n\
             # TYPE catador_inference_time_seconds counter\n\
             catador_inference_time_seconds {:.6}\n\
             # HELP catador_requests_per_second Request rate\n\
             # TYPE catador_requests_per_second gauge\n\
             catador_requests_per_second {:.2}\n\
             # HELP catador_avg_latency_ms Average prediction latency\n\
             # TYPE catador_avg_latency_ms gauge\n\
             catador_avg_latency_ms {:.2}\n\
             # HELP catador_error_rate Error rate (0.0-1.0)\n\
             # TYPE catador_error_rate gauge\n\
             catador_error_rate {:.4}\n\
             # HELP catador_uptime_seconds Uptime in seconds\n\
             # TYPE catador_uptime_seconds counter\n\
             catador_uptime_seconds {}\n",
            snapshot.total_requests,
            snapshot.successful_requests,
            snapshot.failed_requests,
            snapshot.total_inference_time_us as f64 / 1_000_000.0,
            snapshot.requests_per_sec,
            snapshot.avg_latency_ms,
            snapshot.error_rate,
            snapshot.uptime_secs
        )
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the collected metrics
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Total prediction requests seen
    pub total_requests: usize,
    /// Requests that produced a prediction
    pub successful_requests: usize,
    /// Requests rejected or failed
    pub failed_requests: usize,
    /// Total inference time in microseconds
    pub total_inference_time_us: u64,
    /// Seconds since the collector was created
    pub uptime_secs: u64,
    /// Requests per second over the whole uptime
    pub requests_per_sec: f64,
    /// Mean end-to-end prediction latency in milliseconds
    pub avg_latency_ms: f64,
    /// Failed requests over total requests
    pub error_rate: f64,
}
