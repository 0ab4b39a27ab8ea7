//! Scripted launchers for unit tests.
use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::launcher::{Acknowledgement, LaunchContext, LaunchError, Launcher, SubmissionRecord};

pub(crate) enum Script {
    Accept,
    Reject(&'static str),
    Fail,
    Hang(Duration),
}

pub(crate) struct ScriptedLauncher {
    script: Script,
    calls: AtomicUsize,
    seen: Mutex<Vec<SubmissionRecord>>,
}

impl ScriptedLauncher {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn seen(&self) -> Vec<SubmissionRecord> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Launcher for ScriptedLauncher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn submit(
        &self,
        record: &SubmissionRecord,
        _ctx: &LaunchContext,
    ) -> Result<Acknowledgement, LaunchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(record.clone());

        match &self.script {
            Script::Accept => Ok(Acknowledgement {
                reference: Some("arn:aws:ecs:test".into()),
            }),
            Script::Reject(reason) => Err(LaunchError::Rejected {
                reason: reason.to_string(),
            }),
            Script::Fail => Err(LaunchError::Spawn("no such program".into())),
            Script::Hang(d) => {
                tokio::time::sleep(*d).await;
                Ok(Acknowledgement::default())
            }
        }
    }
}
