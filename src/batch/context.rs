//! Run context
//!
//! Carries the run identifier and the event sink into the runner. Every
//! event emitted through the context is tagged with `run_id`.

use uuid::Uuid;

use crate::observability::{Event, EventSink};

/// Per-run state shared by the batch runner and the CLI.
pub struct RunContext<'a> {
    run_id: Uuid,
    sink: &'a dyn EventSink,
}

impl<'a> RunContext<'a> {
    /// Creates a context with a fresh run id.
    pub fn new(sink: &'a dyn EventSink) -> Self {
        Self::with_run_id(Uuid::new_v4(), sink)
    }

    pub fn with_run_id(run_id: Uuid, sink: &'a dyn EventSink) -> Self {
        Self { run_id, sink }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Emits an event at its default severity.
    pub fn emit(&self, event: Event, fields: &[(&str, &str)]) {
        let run_id = self.run_id.to_string();
        let mut tagged = Vec::with_capacity(fields.len() + 1);
        tagged.push(("run_id", run_id.as_str()));
        tagged.extend_from_slice(fields);
        self.sink.emit(event.severity(), event, &tagged);
    }
}
