//! Prometheus backend for launch metrics.
//!
//! ## Metrics
//! - `labelgate_launches_started_total{launcher}` - Counter
//! - `labelgate_launches_completed_total{launcher, outcome}` - Counter
//! - `labelgate_launch_ack_seconds{launcher}` - Histogram of time to acknowledgment
//! - `labelgate_launch_errors_total{launcher, error_kind}` - Counter
//!
//! The `/metrics` route itself lives in `lg-api`.
mod backend;

pub use backend::PrometheusMetrics;
