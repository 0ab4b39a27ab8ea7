use serde::{Deserialize, Serialize};

use lg_model::{DEFAULT_PAYLOAD_VAR, Flag};

use crate::ExecError;

/// Where and how `ecs run-task` starts the worker.
///
/// Loaded once at startup and never mutated; every launch reads the same values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// AWS CLI executable (name on `PATH` or absolute path).
    pub program: String,
    pub region: String,
    pub cluster: String,
    /// ECS launch type (`FARGATE`).
    pub launch_type: String,
    pub task_definition: String,
    /// Container to override; `None` means the container named like the task definition.
    pub container_name: Option<String>,
    pub subnet_id: String,
    pub assign_public_ip: Flag,
    /// Container variable receiving the serialized descriptor.
    pub payload_var: String,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            program: "aws".to_string(),
            region: "us-east-2".to_string(),
            cluster: "fe-cluster".to_string(),
            launch_type: "FARGATE".to_string(),
            task_definition: "fe-5-nov2025".to_string(),
            container_name: None,
            subnet_id: "subnet-0a068dd9915049166".to_string(),
            assign_public_ip: Flag::enabled(),
            payload_var: DEFAULT_PAYLOAD_VAR.to_string(),
        }
    }
}

impl EcsConfig {
    /// Container name the overrides target.
    pub fn container(&self) -> &str {
        self.container_name
            .as_deref()
            .unwrap_or(&self.task_definition)
    }

    /// Every identity field must be non-blank.
    pub fn validate(&self) -> Result<(), ExecError> {
        let required = [
            ("program", self.program.as_str()),
            ("region", self.region.as_str()),
            ("cluster", self.cluster.as_str()),
            ("launch_type", self.launch_type.as_str()),
            ("task_definition", self.task_definition.as_str()),
            ("subnet_id", self.subnet_id.as_str()),
            ("payload_var", self.payload_var.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ExecError::InvalidConfig(format!("{field} cannot be empty")));
            }
        }
        if let Some(name) = &self.container_name {
            if name.trim().is_empty() {
                return Err(ExecError::InvalidConfig(
                    "container_name cannot be blank when set".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EcsConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.container(), "fe-5-nov2025");
        assert!(cfg.assign_public_ip.is_enabled());
        assert_eq!(cfg.payload_var, "EXAME_JSON");
    }

    #[test]
    fn explicit_container_name() {
        let cfg = EcsConfig {
            container_name: Some("worker".into()),
            ..Default::default()
        };
        assert_eq!(cfg.container(), "worker");
    }

    #[test]
    fn blank_fields_are_rejected() {
        let cfg = EcsConfig {
            subnet_id: "  ".into(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("subnet_id"));

        let cfg = EcsConfig {
            container_name: Some(String::new()),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let cfg: EcsConfig =
            serde_json::from_str(r#"{"cluster":"other","assign_public_ip":false}"#).unwrap();
        assert_eq!(cfg.cluster, "other");
        assert!(cfg.assign_public_ip.is_disabled());
        assert_eq!(cfg.region, "us-east-2");
    }
}
