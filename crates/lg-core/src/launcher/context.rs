use std::fmt;

use crate::metrics::MetricsHandle;

/// Shared dependencies handed to every launch.
#[derive(Clone)]
pub struct LaunchContext {
    metrics: MetricsHandle,
}

impl LaunchContext {
    pub fn new(metrics: MetricsHandle) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for LaunchContext {
    fn default() -> Self {
        Self::new(crate::metrics::noop_metrics())
    }
}

impl fmt::Debug for LaunchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchContext")
            .field("metrics", &"<handle>")
            .finish()
    }
}
