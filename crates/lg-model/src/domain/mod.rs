mod kv;
pub use kv::KeyValue;

mod env;
pub use env::Env;

mod flag;
pub use flag::Flag;

mod constants;
pub use constants::{DEFAULT_PAYLOAD_VAR, JOB_PAYLOAD_VAR, STARTED_BY_PREFIX};

/// Timeout value in milliseconds.
pub type TimeoutMs = u64;
