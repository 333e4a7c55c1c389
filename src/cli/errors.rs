//! CLI-specific error types
//!
//! Every CLI error ends the process with a nonzero exit code.

use std::fmt;
use std::io;

use crate::aggregate::AggregateError;
use crate::batch::BatchError;
use crate::filter::FilterError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Filter name not registered
    UnknownFilter,
    /// A source could not be read
    SourceReadError,
    /// The output could not be written
    SourceWriteError,
    /// No source could be evaluated (or any failed, when failing fast)
    SourcesFailed,
    /// Other I/O error (stdout, issue drafts)
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "INV_CLI_CONFIG_ERROR",
            Self::UnknownFilter => "INV_CLI_UNKNOWN_FILTER",
            Self::SourceReadError => "INV_CLI_SOURCE_READ_ERROR",
            Self::SourceWriteError => "INV_CLI_SOURCE_WRITE_ERROR",
            Self::SourcesFailed => "INV_CLI_SOURCES_FAILED",
            Self::IoError => "INV_CLI_IO_ERROR",
        }
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownFilter => 2,
            _ => 1,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Sources failed evaluation
    pub fn sources_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::SourcesFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<FilterError> for CliError {
    fn from(e: FilterError) -> Self {
        Self::new(CliErrorCode::UnknownFilter, e.to_string())
    }
}

impl From<BatchError> for CliError {
    fn from(e: BatchError) -> Self {
        match e {
            BatchError::Filter(e) => e.into(),
            BatchError::Source(e) => Self::new(CliErrorCode::SourceReadError, e.to_string()),
        }
    }
}

impl From<AggregateError> for CliError {
    fn from(e: AggregateError) -> Self {
        Self::new(CliErrorCode::SourceWriteError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
