//! invaudit - audit form-completeness inventories
//!
//! Flags inventory rows whose recorded annotations (missingness, completion,
//! exclusion) disagree with their actual content, for human review.
//!
//! Flow: `cli` resolves a filter from the `filter` registry, `batch` applies
//! it to each `inventory` source, `aggregate` merges and writes the matches.

pub mod aggregate;
pub mod batch;
pub mod cli;
pub mod filter;
pub mod inventory;
pub mod issues;
pub mod observability;
