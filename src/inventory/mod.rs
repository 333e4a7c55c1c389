//! Inventory subsystem for invaudit
//!
//! An inventory is one tabular source: one row per (subject, event, form)
//! instance, with the completeness annotations the filters inspect.
//!
//! # Design Principles
//!
//! - Sources are read-only snapshots, loaded whole
//! - Cells keep their original text; numbers are parsed on demand
//! - Null cells follow NA-token semantics
//! - Missing columns are reported, never defaulted

mod errors;
mod loader;
mod table;

pub use errors::{InventoryError, InventoryResult};
pub use loader::{FileSourceLoader, ReadOptions, SourceLoader};
pub use table::{InventoryTable, NumericColumn};

/// Count of populated data fields, computed upstream of this tool.
pub const NON_NAN_COUNT: &str = "non_nan_count";

/// Tri-state missingness annotation (null, 0 or 1).
pub const MISSING: &str = "missing";

/// Completion status code; 2 means complete.
pub const COMPLETE: &str = "complete";

/// Exclusion flag; 1 means excluded from analysis.
pub const EXCLUDE: &str = "exclude";
