//! Configuration file
//!
//! Optional JSON file passed with `--config`. Every field has a default;
//! unknown fields are rejected. Command-line flags override file values.
//!
//! ```json
//! {
//!   "delimiter": ",",
//!   "na_values": ["-", "?"],
//!   "normalize_integers": true,
//!   "fail_fast": false,
//!   "issue_labels": ["filter_inventory", "qc"]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::WriteOptions;
use crate::batch::FailurePolicy;
use crate::inventory::ReadOptions;
use crate::issues::TOOL_NAME;

use super::errors::{CliError, CliResult};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Field delimiter for inputs and output (default ',')
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Extra cell values read as null
    #[serde(default)]
    pub na_values: Vec<String>,

    /// Write `5.0`-style cells as `5` (default true)
    #[serde(default = "default_normalize_integers")]
    pub normalize_integers: bool,

    /// Stop at the first failing source (default false)
    #[serde(default)]
    pub fail_fast: bool,

    /// Labels attached to issue drafts
    #[serde(default = "default_issue_labels")]
    pub issue_labels: Vec<String>,
}

fn default_delimiter() -> char {
    ','
}
fn default_normalize_integers() -> bool {
    true
}
fn default_issue_labels() -> Vec<String> {
    vec![TOOL_NAME.to_string()]
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            na_values: Vec::new(),
            normalize_integers: default_normalize_integers(),
            fail_fast: false,
            issue_labels: default_issue_labels(),
        }
    }
}

impl AuditConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: AuditConfig = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(CliError::config_error(format!(
                "Invalid delimiter: {:?}. Must be a single ASCII character other than a quote or line break.",
                self.delimiter
            )));
        }

        if self.issue_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(CliError::config_error("issue_labels must not contain empty labels"));
        }

        Ok(())
    }

    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            delimiter: self.delimiter as u8,
            na_values: self.na_values.clone(),
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            delimiter: self.delimiter as u8,
            normalize_integers: self.normalize_integers,
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::CollectAll
        }
    }
}
