use std::sync::Arc;

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use lg_core::{LaunchOutcome, MetricsBackend};

const NAMESPACE: &str = "labelgate";

/// [`MetricsBackend`] backed by a prometheus [`Registry`].
///
/// Labels are bounded: `launcher` is a launcher name, `outcome` one of
/// `accepted|rejected|unknown|errored`, `error_kind` one of the launch error kinds.
#[derive(Clone)]
pub struct PrometheusMetrics {
    launches_started: CounterVec,
    launches_completed: CounterVec,
    ack_duration: HistogramVec,
    launch_errors: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let launches_started = CounterVec::new(
            Opts::new("launches_started_total", "Launch submissions started").namespace(NAMESPACE),
            &["launcher"],
        )?;
        registry.register(Box::new(launches_started.clone()))?;

        let launches_completed = CounterVec::new(
            Opts::new(
                "launches_completed_total",
                "Launch submissions finished, by outcome",
            )
            .namespace(NAMESPACE),
            &["launcher", "outcome"],
        )?;
        registry.register(Box::new(launches_completed.clone()))?;

        // Upper buckets straddle the default 25s acknowledgment bound.
        let ack_duration = HistogramVec::new(
            HistogramOpts::new(
                "launch_ack_seconds",
                "Time from submission to platform answer or give-up",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 25.0, 30.0, 60.0]),
            &["launcher"],
        )?;
        registry.register(Box::new(ack_duration.clone()))?;

        let launch_errors = CounterVec::new(
            Opts::new("launch_errors_total", "Launch failures by kind").namespace(NAMESPACE),
            &["launcher", "error_kind"],
        )?;
        registry.register(Box::new(launch_errors.clone()))?;

        Ok(Self {
            launches_started,
            launches_completed,
            ack_duration,
            launch_errors,
            registry,
        })
    }

    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Text exposition format, ready to serve on `/metrics`.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_launch_started(&self, launcher: &str) {
        self.launches_started.with_label_values(&[launcher]).inc();
    }

    fn record_launch_completed(&self, launcher: &str, outcome: LaunchOutcome, duration_ms: u64) {
        self.launches_completed
            .with_label_values(&[launcher, outcome.as_label()])
            .inc();
        self.ack_duration
            .with_label_values(&[launcher])
            .observe(duration_ms as f64 / 1000.0);
    }

    fn record_launch_error(&self, launcher: &str, error_kind: &str) {
        self.launch_errors
            .with_label_values(&[launcher, error_kind])
            .inc();
    }
}
