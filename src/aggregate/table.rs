//! Column-union concatenation

use crate::batch::BatchReport;
use crate::inventory::InventoryTable;

/// The merged output of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AggregateTable {
    /// Merges a report's matches.
    ///
    /// With no matches, the header falls back to the columns of the sources
    /// that were evaluated, or to `required` (the filter's columns) when no
    /// source was.
    pub fn from_report(report: &BatchReport, required: &[&str]) -> Self {
        let mut fallback = report.evaluated_columns();
        if fallback.is_empty() {
            fallback = required.iter().map(|c| c.to_string()).collect();
        }
        aggregate(report.matches(), &fallback)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Concatenates selections with column-union semantics.
///
/// A cell is empty where its source lacks the column. `fallback_columns`
/// is the header used only when `parts` is empty.
pub fn aggregate(parts: &[InventoryTable], fallback_columns: &[String]) -> AggregateTable {
    if parts.is_empty() {
        return AggregateTable {
            columns: fallback_columns.to_vec(),
            rows: Vec::new(),
        };
    }

    let mut columns: Vec<String> = Vec::new();
    for part in parts {
        for header in part.headers() {
            if !columns.contains(header) {
                columns.push(header.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(parts.iter().map(|p| p.len()).sum());
    for part in parts {
        let positions: Vec<Option<usize>> =
            columns.iter().map(|c| part.column_index(c)).collect();
        for row in part.rows() {
            rows.push(
                positions
                    .iter()
                    .map(|pos| pos.map(|i| row[i].clone()).unwrap_or_default())
                    .collect(),
            );
        }
    }

    AggregateTable { columns, rows }
}
