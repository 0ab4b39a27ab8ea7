use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model '{0}' not supported")]
    UnknownModel(String),

    #[error("invalid value: {0}")]
    Invalid(String),

    #[error("descriptor encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
