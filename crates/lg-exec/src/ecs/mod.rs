//! ECS launcher: starts one Fargate task per dispatch through the AWS CLI.
//!
//! The job descriptor travels as a single container environment variable in the
//! `run-task` overrides; the run is tagged with the dispatcher's `started-by` id.
mod config;
mod invocation;
mod launcher;
mod output;

pub use config::EcsConfig;
pub use invocation::RunTaskInvocation;
pub use launcher::EcsRunTaskLauncher;
pub use output::{OutputLogConfig, parse_acknowledgement};
