use serde::Deserialize;
use tracing::{debug, info, warn};

use lg_core::{Acknowledgement, LaunchError};

/// How captured CLI output is written to the log.
#[derive(Debug, Clone, Copy)]
pub struct OutputLogConfig {
    /// Max characters kept per line.
    pub max_line_length: usize,
    /// Log stdout at INFO level (false = DEBUG).
    pub stdout_info: bool,
    /// Log stderr at WARN level (false = DEBUG).
    pub stderr_warn: bool,
}

impl Default for OutputLogConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            stdout_info: false,
            stderr_warn: true,
        }
    }
}

impl OutputLogConfig {
    pub fn clip<'a>(&self, line: &'a str) -> &'a str {
        match line.char_indices().nth(self.max_line_length) {
            Some((i, _)) => &line[..i],
            None => line,
        }
    }

    pub fn log_stdout(&self, started_by: &str, text: &str) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let line = self.clip(line);
            if self.stdout_info {
                info!(started_by, stream = "stdout", "{line}");
            } else {
                debug!(started_by, stream = "stdout", "{line}");
            }
        }
    }

    pub fn log_stderr(&self, started_by: &str, text: &str) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let line = self.clip(line);
            if self.stderr_warn {
                warn!(started_by, stream = "stderr", "{line}");
            } else {
                debug!(started_by, stream = "stderr", "{line}");
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunTaskResponse {
    tasks: Vec<StartedTask>,
    failures: Vec<Failure>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StartedTask {
    task_arn: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Failure {
    arn: Option<String>,
    reason: Option<String>,
    detail: Option<String>,
}

impl Failure {
    fn describe(&self) -> String {
        let mut out = self.reason.clone().unwrap_or_else(|| "unknown".into());
        if let Some(detail) = &self.detail {
            out.push_str(&format!(" ({detail})"));
        }
        if let Some(arn) = &self.arn {
            out.push_str(&format!(" [{arn}]"));
        }
        out
    }
}

/// Interpret the stdout of a successful `run-task` call.
///
/// A JSON document listing `failures` is a rejection even with exit code 0.
/// Output that is not JSON (e.g. `--output text`) counts as accepted.
pub fn parse_acknowledgement(stdout: &str) -> Result<Acknowledgement, LaunchError> {
    let Ok(resp) = serde_json::from_str::<RunTaskResponse>(stdout.trim()) else {
        return Ok(Acknowledgement::default());
    };
    if !resp.failures.is_empty() {
        let reason = resp
            .failures
            .iter()
            .map(Failure::describe)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(LaunchError::Rejected { reason });
    }
    Ok(Acknowledgement {
        reference: resp.tasks.into_iter().find_map(|t| t.task_arn),
    })
}
