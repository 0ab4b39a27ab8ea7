//! Launch metrics abstraction.
//!
//! Backends (see `lg-prometheus`) implement [`MetricsBackend`]; the default is a no-op.
mod backend;
pub use backend::{LaunchOutcome, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels_are_stable() {
        let labels: Vec<_> = [
            LaunchOutcome::Accepted,
            LaunchOutcome::Rejected,
            LaunchOutcome::Unknown,
            LaunchOutcome::Errored,
        ]
        .iter()
        .map(LaunchOutcome::as_label)
        .collect();

        assert_eq!(labels, ["accepted", "rejected", "unknown", "errored"]);
    }

    #[test]
    fn noop_is_zero_sized() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
        let m = noop_metrics();
        m.record_launch_started("test");
        m.record_launch_completed("test", LaunchOutcome::Unknown, 25_000);
        m.record_launch_error("test", "spawn_failed");
    }
}
