use thiserror::Error;

use lg_core::LaunchError;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid launcher configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to encode invocation argument: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ExecError> for LaunchError {
    fn from(e: ExecError) -> Self {
        LaunchError::InvalidConfig(e.to_string())
    }
}
