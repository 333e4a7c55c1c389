//! CLI module for invaudit
//!
//! One command: apply a filter to one or more inventory files and write the
//! matching rows. `--list-filters` prints the registry.

mod args;
mod commands;
mod config;
mod errors;

pub use args::Cli;
pub use commands::{execute, list_filters, run, RunSummary};
pub use config::AuditConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
