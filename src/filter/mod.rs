//! Filter subsystem for invaudit
//!
//! A filter is a pure boolean classifier over an inventory's annotation
//! columns. Filters never modify a table; they return a mask aligned with
//! its rows.
//!
//! Filters are registered by name in a static table built once at startup.
//! Adding a filter means writing one function in `library` and one entry in
//! `FilterRegistry::builtin`.

mod errors;
pub mod library;
mod registry;

pub use errors::{FilterError, FilterResult};
pub use registry::{Filter, FilterFn, FilterRegistry};

/// Row selection aligned one-to-one with a table's rows
pub type Mask = Vec<bool>;
