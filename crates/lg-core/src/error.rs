use thiserror::Error;

/// Errors the gateway reports synchronously to its caller.
///
/// Anything that happens after the launch is scheduled is only logged.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("model '{0}' not supported")]
    UnsupportedModel(String),

    #[error("no image path provided")]
    MissingLocator,

    #[error("descriptor encoding failed: {0}")]
    Encode(String),
}
