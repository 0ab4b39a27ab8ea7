use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// The orchestration platform answered and refused the run.
    #[error("launch rejected: {reason}")]
    Rejected { reason: String },

    #[error("failed to start launch invocation: {0}")]
    Spawn(String),

    #[error("invalid launcher configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(String),
}

impl LaunchError {
    /// Low-cardinality label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LaunchError::Rejected { .. } => "rejected",
            LaunchError::Spawn(_) => "spawn_failed",
            LaunchError::InvalidConfig(_) => "invalid_config",
            LaunchError::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for LaunchError {
    fn from(e: std::io::Error) -> Self {
        LaunchError::Io(e.to_string())
    }
}
