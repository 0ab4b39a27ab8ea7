mod error;
pub use error::ExecError;

mod metrics;
pub use metrics::LAUNCHER_ECS_CLI;

#[cfg(feature = "ecs")]
pub mod ecs;
