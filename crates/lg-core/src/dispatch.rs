//! Fire-and-forget launch orchestration.
//!
//! [`Dispatcher::fire_and_forget`] encodes the descriptor on the caller's task, then hands
//! the submission to a detached tokio task that waits a bounded time for the platform's
//! acknowledgment and reports the outcome through logs and metrics only.
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};

use lg_model::{JobDescriptor, STARTED_BY_PREFIX, TimeoutMs};

use crate::{
    error::CoreError,
    launcher::{LaunchContext, LaunchError, Launcher, SubmissionRecord, make_started_by},
    metrics::LaunchOutcome,
};

/// Dispatcher settings, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// How long the background task waits for the platform to acknowledge a run request.
    pub ack_timeout_ms: TimeoutMs,
    /// Prefix of the `started-by` run identifier.
    pub started_by_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            ack_timeout_ms: 25_000,
            started_by_prefix: STARTED_BY_PREFIX.to_string(),
        }
    }
}

/// Schedules launches on independent tasks.
///
/// Cheap to clone; no state is shared between launches beyond the launcher itself.
#[derive(Clone)]
pub struct Dispatcher {
    launcher: Arc<dyn Launcher>,
    ctx: LaunchContext,
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(launcher: Arc<dyn Launcher>, config: DispatchConfig) -> Self {
        Self {
            launcher,
            ctx: LaunchContext::default(),
            config,
        }
    }

    pub fn with_context(mut self, ctx: LaunchContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Encode `descriptor` and start its submission in the background.
    ///
    /// Returns as soon as the task is spawned. Only encoding can fail here; every later
    /// failure is logged by the background task. Must be called within a tokio runtime.
    pub fn fire_and_forget(&self, descriptor: JobDescriptor) -> Result<LaunchHandle, CoreError> {
        let payload = descriptor
            .to_compact_json()
            .map_err(|e| CoreError::Encode(e.to_string()))?;

        let record = SubmissionRecord {
            started_by: make_started_by(&self.config.started_by_prefix),
            payload,
        };
        let started_by = record.started_by.clone();
        let span = info_span!("launch", launcher = self.launcher.name(), started_by = %started_by);

        let handle = tokio::spawn(
            submit_bounded(
                Arc::clone(&self.launcher),
                self.ctx.clone(),
                record,
                Duration::from_millis(self.config.ack_timeout_ms),
            )
            .instrument(span),
        );

        Ok(LaunchHandle { started_by, handle })
    }
}

/// Handle to a scheduled launch.
///
/// Dropping it detaches the launch; awaiting [`LaunchHandle::outcome`] is for tests and tooling.
#[derive(Debug)]
pub struct LaunchHandle {
    started_by: String,
    handle: JoinHandle<LaunchOutcome>,
}

impl LaunchHandle {
    pub fn started_by(&self) -> &str {
        &self.started_by
    }

    /// Wait for the background task. A panicked launch reports [`LaunchOutcome::Errored`].
    pub async fn outcome(self) -> LaunchOutcome {
        self.handle.await.unwrap_or(LaunchOutcome::Errored)
    }
}

async fn submit_bounded(
    launcher: Arc<dyn Launcher>,
    ctx: LaunchContext,
    record: SubmissionRecord,
    wait: Duration,
) -> LaunchOutcome {
    let name = launcher.name();
    let metrics = ctx.metrics().clone();
    metrics.record_launch_started(name);

    debug!(payload = %record.payload, "submitting launch");
    let started = Instant::now();

    let outcome = match tokio::time::timeout(wait, launcher.submit(&record, &ctx)).await {
        Ok(Ok(ack)) => {
            info!(
                reference = ack.reference.as_deref().unwrap_or("-"),
                "launch accepted"
            );
            LaunchOutcome::Accepted
        }
        Ok(Err(LaunchError::Rejected { reason })) => {
            error!(%reason, "launch rejected");
            LaunchOutcome::Rejected
        }
        Ok(Err(e)) => {
            error!(error = %e, "launch failed");
            metrics.record_launch_error(name, e.kind());
            LaunchOutcome::Errored
        }
        Err(_) => {
            warn!(
                wait_ms = wait.as_millis() as u64,
                "no acknowledgment within bounded wait; launch outcome unknown"
            );
            LaunchOutcome::Unknown
        }
    };

    metrics.record_launch_completed(name, outcome, started.elapsed().as_millis() as u64);
    outcome
}
