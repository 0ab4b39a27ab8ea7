mod domain;
pub use domain::{DEFAULT_PAYLOAD_VAR, JOB_PAYLOAD_VAR, STARTED_BY_PREFIX};
pub use domain::{Env, Flag, KeyValue, TimeoutMs};

mod error;
pub use error::{ModelError, ModelResult};

mod locator;
pub use locator::{AddressingTuple, last_segment};

mod catalog;
pub use catalog::{ModelId, ModelProfile, all_labels};

pub mod descriptor;
pub use descriptor::{JobDescriptor, RemoteHost};

mod fallback;
pub use fallback::{FALLBACK_WARNING, FallbackResult};
