//! Event sinks
//!
//! Components never log directly. They emit through an `EventSink` handed
//! to them by the caller, so a run can be observed without a terminal and
//! tests can inspect exactly what was reported.

use std::cell::RefCell;

use super::events::Event;
use super::logger::{Logger, Severity};

/// Destination for run events.
pub trait EventSink {
    /// Record one event. Must not fail the caller.
    fn emit(&self, severity: Severity, event: Event, fields: &[(&str, &str)]);
}

/// Writes JSON log lines to stderr, dropping events below a threshold.
#[derive(Debug, Clone, Copy)]
pub struct StderrSink {
    min_severity: Severity,
}

impl StderrSink {
    pub fn new(min_severity: Severity) -> Self {
        Self { min_severity }
    }

    /// Everything when verbose; warnings and worse otherwise.
    pub fn verbose(verbose: bool) -> Self {
        if verbose {
            Self::new(Severity::Trace)
        } else {
            Self::new(Severity::Warn)
        }
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }
}

impl EventSink for StderrSink {
    fn emit(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        if severity >= self.min_severity {
            Logger::log(severity, event.as_str(), fields);
        }
    }
}

/// One event captured by a `MemorySink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub severity: Severity,
    pub event: Event,
    pub fields: Vec<(String, String)>,
}

impl EmittedEvent {
    /// Value of a field, if present.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory sink for testing.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: RefCell<Vec<EmittedEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.events.borrow().clone()
    }

    /// Captured events of one kind.
    pub fn of_kind(&self, event: Event) -> Vec<EmittedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.event == event)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        self.events.borrow_mut().push(EmittedEvent {
            severity,
            event,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}
