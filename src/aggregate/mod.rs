//! Aggregate subsystem for invaudit
//!
//! Merges the per-source selections of a batch into one table and writes it
//! as delimited text.
//!
//! # Guarantees
//!
//! - Columns are the union of the contributing sources' columns, in order of
//!   first appearance
//! - Rows keep source order, then original row order
//! - A run with no matches still writes a header
//! - Integral values are written without decimals

mod errors;
mod table;
mod writer;

pub use errors::{AggregateError, AggregateResult};
pub use table::{aggregate, AggregateTable};
pub use writer::{render_cell, write_table, OutputTarget, WriteOptions};
