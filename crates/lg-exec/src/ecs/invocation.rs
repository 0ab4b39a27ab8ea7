use std::fmt;

use serde::Serialize;
use tracing::trace;

use lg_core::SubmissionRecord;
use lg_model::Env;

use crate::{ExecError, ecs::config::EcsConfig};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NetworkConfiguration<'a> {
    awsvpc_configuration: AwsVpcConfiguration<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AwsVpcConfiguration<'a> {
    subnets: [&'a str; 1],
    assign_public_ip: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Overrides<'a> {
    container_overrides: [ContainerOverride<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ContainerOverride<'a> {
    name: &'a str,
    environment: &'a Env,
}

/// Fully resolved `aws ecs run-task` command line for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTaskInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Container variables carried in `--overrides`.
    pub environment: Env,
    pub started_by: String,
}

impl RunTaskInvocation {
    /// Build the invocation from the launcher config and the submission.
    ///
    /// The container environment holds exactly one variable: the job payload.
    pub fn build(config: &EcsConfig, record: &SubmissionRecord) -> Result<Self, ExecError> {
        let environment = Env::single(config.payload_var.as_str(), record.payload.as_str());

        let network = serde_json::to_string(&NetworkConfiguration {
            awsvpc_configuration: AwsVpcConfiguration {
                subnets: [config.subnet_id.as_str()],
                assign_public_ip: config.assign_public_ip.as_switch(),
            },
        })?;
        let overrides = serde_json::to_string(&Overrides {
            container_overrides: [ContainerOverride {
                name: config.container(),
                environment: &environment,
            }],
        })?;

        let args = [
            "ecs",
            "run-task",
            "--region",
            config.region.as_str(),
            "--cluster",
            config.cluster.as_str(),
            "--launch-type",
            config.launch_type.as_str(),
            "--task-definition",
            config.task_definition.as_str(),
            "--network-configuration",
            network.as_str(),
            "--started-by",
            record.started_by.as_str(),
            "--overrides",
            overrides.as_str(),
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let inv = Self {
            program: config.program.clone(),
            args,
            environment,
            started_by: record.started_by.clone(),
        };
        inv.validate()?;
        Ok(inv)
    }

    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidConfig("program cannot be empty".into()));
        }
        if self.started_by.trim().is_empty() {
            return Err(ExecError::InvalidConfig("started_by cannot be empty".into()));
        }
        Ok(())
    }

    /// Value following `flag` in the argument list.
    pub fn arg(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn trace_state(&self) {
        trace!(
            program = %self.program,
            started_by = %self.started_by,
            env_count = self.environment.len(),
            "run-task invocation resolved"
        );
    }
}

impl fmt::Display for RunTaskInvocation {
    /// Command line without the overrides document, which carries the payload.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        let mut skip = false;
        for a in &self.args {
            if skip {
                f.write_str(" <payload>")?;
                skip = false;
                continue;
            }
            write!(f, " {a}")?;
            skip = a == "--overrides";
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            started_by: "temporary-run-1731000000".into(),
            payload: r#"{"model":"ef_analysis","scan":"Scan9"}"#.into(),
        }
    }

    #[test]
    fn builds_run_task_command_line() {
        let inv = RunTaskInvocation::build(&EcsConfig::default(), &record()).unwrap();

        assert_eq!(inv.program, "aws");
        assert_eq!(&inv.args[..2], ["ecs", "run-task"]);
        assert_eq!(inv.arg("--region"), Some("us-east-2"));
        assert_eq!(inv.arg("--cluster"), Some("fe-cluster"));
        assert_eq!(inv.arg("--launch-type"), Some("FARGATE"));
        assert_eq!(inv.arg("--task-definition"), Some("fe-5-nov2025"));
        assert_eq!(inv.arg("--started-by"), Some("temporary-run-1731000000"));
    }

    #[test]
    fn network_configuration_document() {
        let inv = RunTaskInvocation::build(&EcsConfig::default(), &record()).unwrap();
        let net: Value = serde_json::from_str(inv.arg("--network-configuration").unwrap()).unwrap();
        assert_eq!(
            net,
            json!({"awsvpcConfiguration": {
                "subnets": ["subnet-0a068dd9915049166"],
                "assignPublicIp": "ENABLED"
            }})
        );
    }

    #[test]
    fn overrides_carry_payload_verbatim() {
        let inv = RunTaskInvocation::build(&EcsConfig::default(), &record()).unwrap();
        let ov: Value = serde_json::from_str(inv.arg("--overrides").unwrap()).unwrap();
        assert_eq!(
            ov,
            json!({"containerOverrides": [{
                "name": "fe-5-nov2025",
                "environment": [{
                    "name": "EXAME_JSON",
                    "value": "{\"model\":\"ef_analysis\",\"scan\":\"Scan9\"}"
                }]
            }]})
        );
    }

    #[test]
    fn environment_holds_only_payload() {
        let inv = RunTaskInvocation::build(&EcsConfig::default(), &record()).unwrap();
        assert_eq!(inv.environment.len(), 1);
        assert_eq!(
            inv.environment.get("EXAME_JSON"),
            Some(record().payload.as_str())
        );
    }

    #[test]
    fn custom_container_and_disabled_public_ip() {
        let cfg = EcsConfig {
            container_name: Some("worker".into()),
            assign_public_ip: lg_model::Flag::disabled(),
            payload_var: lg_model::JOB_PAYLOAD_VAR.into(),
            ..Default::default()
        };
        let inv = RunTaskInvocation::build(&cfg, &record()).unwrap();
        let ov: Value = serde_json::from_str(inv.arg("--overrides").unwrap()).unwrap();
        assert_eq!(ov["containerOverrides"][0]["name"], "worker");
        assert_eq!(
            ov["containerOverrides"][0]["environment"][0]["name"],
            "JOB_PAYLOAD"
        );
        assert!(inv.arg("--network-configuration").unwrap().contains("DISABLED"));
    }

    #[test]
    fn display_hides_payload() {
        let inv = RunTaskInvocation::build(&EcsConfig::default(), &record()).unwrap();
        let shown = inv.to_string();
        assert!(shown.starts_with("aws ecs run-task --region us-east-2"));
        assert!(shown.ends_with("--overrides <payload>"));
        assert!(!shown.contains("Scan9"));
    }

    #[test]
    fn empty_started_by_is_invalid() {
        let rec = SubmissionRecord {
            started_by: String::new(),
            payload: "{}".into(),
        };
        assert!(RunTaskInvocation::build(&EcsConfig::default(), &rec).is_err());
    }
}
