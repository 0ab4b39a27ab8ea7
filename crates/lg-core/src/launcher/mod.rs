//! Launcher abstraction: the out-of-process call that asks an orchestration
//! platform to start one job.
//!
//! Concrete launchers live in `lg-exec`; tests plug in their own.
mod error;
pub use error::LaunchError;

mod context;
pub use context::LaunchContext;

mod id;
pub use id::{make_started_by, started_by_at};

use async_trait::async_trait;

/// Transport-neutral part of a submission: who started it and what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    /// Run identifier passed as `started-by`.
    pub started_by: String,
    /// Serialized job descriptor.
    pub payload: String,
}

/// Positive answer from the platform: the run request was accepted.
///
/// Says nothing about whether the job itself will finish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Platform-side handle of the started run (e.g. a task ARN), if reported.
    pub reference: Option<String>,
}

/// Submits one run request and waits for the platform's answer.
///
/// Implementations must not retry; the caller bounds the wait.
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Launcher name used in logs and metric labels.
    fn name(&self) -> &'static str;

    async fn submit(
        &self,
        record: &SubmissionRecord,
        ctx: &LaunchContext,
    ) -> Result<Acknowledgement, LaunchError>;
}
