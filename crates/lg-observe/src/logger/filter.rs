use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::logger::{LoggerError, LoggerResult};

/// Validated `EnvFilter` directive string, e.g. `"info"` or `"lg_api=debug,info"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogFilter(String);

impl LogFilter {
    pub fn new(s: impl Into<String>) -> LoggerResult<Self> {
        Self::try_from(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_env_filter(&self) -> LoggerResult<EnvFilter> {
        EnvFilter::try_new(&self.0).map_err(|e| LoggerError::InvalidFilter(format!("{}: {e}", self.0)))
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LogFilter {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LogFilter {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let s = s.trim().to_string();
        if s.is_empty() {
            return Err(LoggerError::InvalidFilter("empty filter".into()));
        }
        EnvFilter::try_new(&s).map_err(|e| LoggerError::InvalidFilter(format!("{s}: {e}")))?;
        Ok(Self(s))
    }
}

impl From<LogFilter> for String {
    fn from(f: LogFilter) -> Self {
        f.0
    }
}
