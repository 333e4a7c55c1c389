//! Batch error types
//!
//! Only errors that end the whole batch appear here. Per-source evaluation
//! failures are data, recorded in the `BatchReport`.

use thiserror::Error;

use crate::filter::FilterError;
use crate::inventory::InventoryError;

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Fatal batch errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    /// Filter name rejected before any source was touched
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// A source could not be read
    #[error(transparent)]
    Source(#[from] InventoryError),
}

impl BatchError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            BatchError::Filter(e) => e.code(),
            BatchError::Source(e) => e.code(),
        }
    }
}
