//! Batch subsystem for invaudit
//!
//! Applies one filter to an ordered list of sources. Each source is loaded,
//! evaluated and summarized before the next one starts.
//!
//! # Outcomes per source
//!
//! - matched: at least one row selected, kept for aggregation
//! - no matches: evaluated, nothing selected, skipped
//! - failed: the filter could not be evaluated (missing column, bad value);
//!   recorded, and the batch moves on
//!
//! A source that cannot be read at all ends the batch.

mod context;
mod errors;
mod report;
mod runner;

pub use context::RunContext;
pub use errors::{BatchError, BatchResult};
pub use report::{BatchReport, FailureKind, FailurePolicy, SourceFailure, SourceSummary};
pub use runner::{evaluate, BatchRunner};
