//! Dispatch gateway: the inference entry point in dispatch mode.
//!
//! Per request: `validate → build → dispatch → acknowledge`. The acknowledgment is
//! produced right after the launch is scheduled; there is no "job completed" state.
use tracing::{debug, info, instrument};

use lg_model::{AddressingTuple, JobDescriptor, ModelId, RemoteHost};

use crate::{
    dispatch::{Dispatcher, LaunchHandle},
    error::CoreError,
};

/// Terminal happy-path state of a dispatch.
#[derive(Debug)]
pub struct Acknowledged {
    pub model: ModelId,
    pub launch: LaunchHandle,
}

impl Acknowledged {
    /// Body message returned to the viewer.
    pub fn message(&self) -> String {
        format!("OK - {}", self.model)
    }
}

pub struct DispatchGateway {
    host: RemoteHost,
    dispatcher: Dispatcher,
}

impl DispatchGateway {
    pub fn new(host: RemoteHost, dispatcher: Dispatcher) -> Self {
        Self { host, dispatcher }
    }

    /// Validate the request, build its descriptor and schedule the launch.
    ///
    /// The model is checked before the locator; an absent or empty locator is rejected
    /// before any descriptor exists. Must be called within a tokio runtime.
    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&self, model: &str, image: Option<&str>) -> Result<Acknowledged, CoreError> {
        let model: ModelId = model
            .parse()
            .map_err(|_| CoreError::UnsupportedModel(model.to_string()))?;
        let locator = image
            .filter(|s| !s.is_empty())
            .ok_or(CoreError::MissingLocator)?;

        let addr = AddressingTuple::parse(locator);
        let descriptor = JobDescriptor::build(&addr, model, &self.host);
        debug!(?descriptor, "job descriptor built");

        let launch = self.dispatcher.fire_and_forget(descriptor)?;
        info!(
            %model,
            image = locator,
            started_by = launch.started_by(),
            "inference dispatched"
        );

        Ok(Acknowledged { model, launch })
    }
}
