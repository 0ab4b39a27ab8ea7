pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod launcher;
pub mod metrics;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{DispatchConfig, Dispatcher, LaunchHandle};
pub use error::CoreError;
pub use gateway::{Acknowledged, DispatchGateway};
pub use launcher::{
    Acknowledgement, LaunchContext, LaunchError, Launcher, SubmissionRecord, make_started_by,
};
pub use metrics::{LaunchOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
