//! Batch outcomes

use serde::Serialize;

use crate::inventory::{InventoryError, InventoryTable};

/// What the runner does after a source fails evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Evaluate every source; report all failures
    #[default]
    CollectAll,
    /// Stop at the first failure; matches gathered so far are kept
    FailFast,
}

/// Why a filter could not be evaluated on a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A column the filter reads is absent
    ColumnMissing,
    /// A column the filter reads holds a non-numeric value
    InvalidValue,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ColumnMissing => "column_missing",
            FailureKind::InvalidValue => "invalid_value",
        }
    }

    /// Classifies an evaluation error. Read errors are not per-source
    /// failures and map to `None`.
    pub fn from_error(error: &InventoryError) -> Option<Self> {
        match error {
            InventoryError::ColumnMissing { .. } => Some(FailureKind::ColumnMissing),
            InventoryError::InvalidValue { .. } => Some(FailureKind::InvalidValue),
            InventoryError::SourceRead { .. } | InventoryError::SourceMalformed { .. } => None,
        }
    }
}

/// A source the filter could not be evaluated on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub filter: String,
    pub kind: FailureKind,
    pub message: String,
}

/// A source the filter was evaluated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: String,
    pub rows: usize,
    pub matched: usize,
    pub columns: Vec<String>,
}

/// Result of one batch run.
///
/// `matches` holds only non-empty selections, in source order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    filter: String,
    policy: FailurePolicy,
    sources_total: usize,
    evaluated: Vec<SourceSummary>,
    matches: Vec<InventoryTable>,
    failures: Vec<SourceFailure>,
    stopped_early: bool,
}

impl BatchReport {
    pub(crate) fn new(filter: impl Into<String>, policy: FailurePolicy, sources_total: usize) -> Self {
        Self {
            filter: filter.into(),
            policy,
            sources_total,
            evaluated: Vec::new(),
            matches: Vec::new(),
            failures: Vec::new(),
            stopped_early: false,
        }
    }

    pub(crate) fn record_evaluated(&mut self, source: &InventoryTable, selected: InventoryTable) {
        self.evaluated.push(SourceSummary {
            source: source.source().to_string(),
            rows: source.len(),
            matched: selected.len(),
            columns: source.headers().to_vec(),
        });
        if !selected.is_empty() {
            self.matches.push(selected);
        }
    }

    pub(crate) fn record_failure(&mut self, failure: SourceFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.stopped_early = true;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Sources the filter was evaluated on, matched or not
    pub fn evaluated(&self) -> &[SourceSummary] {
        &self.evaluated
    }

    /// Non-empty selections, in source order
    pub fn matches(&self) -> &[InventoryTable] {
        &self.matches
    }

    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// Whether sources were left unprocessed after a failure
    pub fn stopped_early(&self) -> bool {
        self.stopped_early
    }

    /// Sources never reached because the batch stopped early
    pub fn skipped(&self) -> usize {
        self.sources_total - self.evaluated.len() - self.failures.len()
    }

    /// Total selected rows across all sources
    pub fn matched_rows(&self) -> usize {
        self.matches.iter().map(|m| m.len()).sum()
    }

    /// Union of the evaluated sources' columns, in order of first appearance
    pub fn evaluated_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for summary in &self.evaluated {
            for column in &summary.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        columns
    }

    /// Whether every source failed
    pub fn all_failed(&self) -> bool {
        !self.failures.is_empty() && self.evaluated.is_empty()
    }

    /// Whether the run counts as successful for the exit status.
    ///
    /// Collecting: fails only when no source could be evaluated.
    /// Fail-fast: fails on any failure.
    pub fn is_success(&self) -> bool {
        match self.policy {
            FailurePolicy::CollectAll => !self.all_failed(),
            FailurePolicy::FailFast => self.failures.is_empty(),
        }
    }
}
