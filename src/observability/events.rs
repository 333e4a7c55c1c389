//! Observability events for invaudit
//!
//! Every line the tool logs is one of these events. Events are explicit and
//! typed; free-form detail goes in the fields.

use std::fmt;

use super::logger::Severity;

/// Observable events in an audit run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Run begins (filter resolved, sources known)
    RunStart,
    /// Run finished and output written
    RunComplete,
    /// Run ended with a fatal error
    RunFailed,

    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Per-source
    /// Source read into memory
    SourceLoaded,
    /// Filter selected at least one row
    FilterMatched,
    /// Filter evaluated and selected nothing
    FilterNoMatches,
    /// Filter could not be evaluated on a source
    FilterFailed,
    /// Remaining sources skipped after a failure (fail-fast)
    BatchStopped,

    // Output
    /// Aggregated table written
    OutputWritten,
    /// Issue drafts written
    IssuesWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RunStart => "RUN_START",
            Event::RunComplete => "RUN_COMPLETE",
            Event::RunFailed => "RUN_FAILED",

            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::SourceLoaded => "SOURCE_LOADED",
            Event::FilterMatched => "FILTER_MATCHED",
            Event::FilterNoMatches => "FILTER_NO_MATCHES",
            Event::FilterFailed => "FILTER_FAILED",
            Event::BatchStopped => "BATCH_STOPPED",

            Event::OutputWritten => "OUTPUT_WRITTEN",
            Event::IssuesWritten => "ISSUES_WRITTEN",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RunFailed => Severity::Fatal,
            Event::FilterFailed | Event::BatchStopped => Severity::Warn,
            Event::ConfigLoaded | Event::SourceLoaded => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
