//! Filter registry error types

use thiserror::Error;

/// Result type for registry operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown filter '{name}'")]
    UnknownFilter { name: String },

    #[error("Filter '{name}' is already registered")]
    DuplicateFilter { name: String },
}

impl FilterError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            FilterError::UnknownFilter { .. } => "INV_UNKNOWN_FILTER",
            FilterError::DuplicateFilter { .. } => "INV_DUPLICATE_FILTER",
        }
    }
}
