//! Inventory error types
//!
//! Error codes:
//! - INV_SOURCE_READ (FATAL)
//! - INV_SOURCE_MALFORMED (FATAL)
//! - INV_COLUMN_MISSING (per source)
//! - INV_INVALID_VALUE (per source)

use thiserror::Error;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("Failed to read source {path}: {reason}")]
    SourceRead { path: String, reason: String },

    #[error("Malformed source {path}: {reason}")]
    SourceMalformed { path: String, reason: String },

    #[error("Column not found: '{column}'")]
    ColumnMissing { column: String },

    #[error("Invalid value in column '{column}' at row {row}: '{value}'")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
}

impl InventoryError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::SourceRead { .. } => "INV_SOURCE_READ",
            InventoryError::SourceMalformed { .. } => "INV_SOURCE_MALFORMED",
            InventoryError::ColumnMissing { .. } => "INV_COLUMN_MISSING",
            InventoryError::InvalidValue { .. } => "INV_INVALID_VALUE",
        }
    }

    pub fn column_missing(column: impl Into<String>) -> Self {
        InventoryError::ColumnMissing {
            column: column.into(),
        }
    }
}
