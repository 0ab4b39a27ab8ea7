use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use lg_core::{Acknowledgement, LaunchContext, LaunchError, Launcher, SubmissionRecord};

use crate::{
    ExecError,
    ecs::{
        config::EcsConfig,
        invocation::RunTaskInvocation,
        output::{OutputLogConfig, parse_acknowledgement},
    },
    metrics::LAUNCHER_ECS_CLI,
};

/// Launcher that shells out to `aws ecs run-task` once per submission.
///
/// The child is not killed if the caller stops waiting; an in-flight
/// `run-task` is left to finish on its own.
pub struct EcsRunTaskLauncher {
    config: EcsConfig,
    log: OutputLogConfig,
}

impl EcsRunTaskLauncher {
    pub fn new(config: EcsConfig) -> Result<Self, ExecError> {
        config.validate()?;
        Ok(Self {
            config,
            log: OutputLogConfig::default(),
        })
    }

}

#[async_trait]
impl Launcher for EcsRunTaskLauncher {
    fn name(&self) -> &'static str {
        LAUNCHER_ECS_CLI
    }

    async fn submit(
        &self,
        record: &SubmissionRecord,
        _ctx: &LaunchContext,
    ) -> Result<Acknowledgement, LaunchError> {
        let inv = RunTaskInvocation::build(&self.config, record)?;
        inv.trace_state();
        debug!(command = %inv, "spawning run-task");

        let mut cmd = Command::new(&inv.program);
        cmd.args(&inv.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false);

        let child = cmd
            .spawn()
            .map_err(|e| LaunchError::Spawn(format!("{}: {e}", inv.program)))?;
        let output = child.wait_with_output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.log.log_stdout(&inv.started_by, &stdout);
        self.log.log_stderr(&inv.started_by, &stderr);

        if !output.status.success() {
            let reason = match output.status.code() {
                Some(code) => {
                    let msg = self.log.clip(stderr.trim());
                    if msg.is_empty() {
                        format!("run-task exited with code {code}")
                    } else {
                        format!("run-task exited with code {code}: {msg}")
                    }
                }
                None => "run-task terminated by signal".to_string(),
            };
            return Err(LaunchError::Rejected { reason });
        }

        let ack = parse_acknowledgement(&stdout)?;
        trace!(started_by = %inv.started_by, reference = ?ack.reference, "run-task acknowledged");
        Ok(ack)
    }
}
