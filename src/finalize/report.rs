//! Job-attributed messages.
//! Every line goes to `tracing` (with a `job` field) and to the job's own message
//! list in the registry, which is what a UI shows per download.

use tracing::{error, info, warn};

use crate::job::{JobId, JobRegistry, MessageKind};

pub struct JobLog<'a> {
    id: JobId,
    name: &'a str,
    registry: &'a dyn JobRegistry,
}

impl<'a> JobLog<'a> {
    pub fn new(id: JobId, name: &'a str, registry: &'a dyn JobRegistry) -> Self {
        Self { id, name, registry }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn info(&self, text: &str) {
        info!(job = %self.name, id = self.id.0, "{text}");
        self.registry.add_message(self.id, MessageKind::Info, text);
    }

    pub fn warn(&self, text: &str) {
        warn!(job = %self.name, id = self.id.0, "{text}");
        self.registry.add_message(self.id, MessageKind::Warning, text);
    }

    pub fn error(&self, text: &str) {
        error!(job = %self.name, id = self.id.0, "{text}");
        self.registry.add_message(self.id, MessageKind::Error, text);
    }
}
