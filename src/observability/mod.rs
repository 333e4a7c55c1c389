//! Observability subsystem for invaudit
//!
//! Provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed run events
//! - Injectable event sinks
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on classification
//! 3. No background threads
//! 4. Deterministic output
//!
//! # Usage
//!
//! ```ignore
//! use invaudit::observability::{Event, EventSink, Severity, StderrSink};
//!
//! let sink = StderrSink::verbose(true);
//! sink.emit(Severity::Info, Event::FilterMatched, &[("source", "baseline.csv")]);
//! ```

mod events;
mod logger;
mod sink;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use sink::{EmittedEvent, EventSink, MemorySink, StderrSink};
