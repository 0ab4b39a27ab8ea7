//! Metric label values for exec launchers.

/// ECS CLI launcher identifier.
pub const LAUNCHER_ECS_CLI: &str = "ecs-cli";
