//! Aggregate error types

use thiserror::Error;

/// Result type for aggregate operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Output errors. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("Failed to write output to {target}: {reason}")]
    Write { target: String, reason: String },
}

impl AggregateError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            AggregateError::Write { .. } => "INV_OUTPUT_WRITE",
        }
    }

    pub(crate) fn write(target: &str, reason: impl ToString) -> Self {
        AggregateError::Write {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}
