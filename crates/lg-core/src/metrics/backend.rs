use std::sync::Arc;

/// How a launch ended, from the gateway's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Platform accepted the run request.
    Accepted,
    /// Platform answered and refused.
    Rejected,
    /// Bounded wait expired before any answer; the run may or may not exist.
    Unknown,
    /// The invocation could not be built or executed.
    Errored,
}

impl LaunchOutcome {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchOutcome::Accepted => "accepted",
            LaunchOutcome::Rejected => "rejected",
            LaunchOutcome::Unknown => "unknown",
            LaunchOutcome::Errored => "errored",
        }
    }
}

/// Metrics sink for launch activity.
///
/// Injected through [`crate::LaunchContext`]; called from the background launch task.
pub trait MetricsBackend: Send + Sync + 'static {
    /// A launch left the gateway and is about to be submitted.
    fn record_launch_started(&self, launcher: &str);

    /// A launch finished waiting: `duration_ms` covers the submission call or the bounded wait.
    fn record_launch_completed(&self, launcher: &str, outcome: LaunchOutcome, duration_ms: u64);

    /// Launcher-level failure (spawn, io, config). Platform refusals are not counted here.
    fn record_launch_error(&self, launcher: &str, error_kind: &str);
}

pub type MetricsHandle = Arc<dyn MetricsBackend>;
