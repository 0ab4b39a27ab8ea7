//! Well-known strings shared between the launcher and the worker containers.

/// Container variable carrying the serialized job descriptor (what deployed workers read).
pub const DEFAULT_PAYLOAD_VAR: &str = "EXAME_JSON";

/// Generic variable name understood by newer worker images.
pub const JOB_PAYLOAD_VAR: &str = "JOB_PAYLOAD";

/// Prefix of the `--started-by` value; the unix second of submission is appended.
pub const STARTED_BY_PREFIX: &str = "temporary-run";
