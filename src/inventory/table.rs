//! In-memory inventory table
//!
//! Cells are stored as the original text. Annotation columns are parsed into
//! nullable numbers only when a filter asks for them, so columns no filter
//! touches (identifiers, free text) pass through exactly as read.

use std::collections::HashSet;

use super::errors::{InventoryError, InventoryResult};

/// Tokens read as null, matched after trimming whitespace.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A",
    "<NA>",
];

/// A loaded inventory source.
///
/// Invariants:
/// - header names are unique
/// - every row has exactly one cell per header
/// - the table is never modified after loading; selections produce new tables
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTable {
    source: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    na_values: Vec<String>,
}

impl InventoryTable {
    /// Creates a table, checking header uniqueness and row widths.
    pub fn new(
        source: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> InventoryResult<Self> {
        let source = source.into();

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(InventoryError::SourceMalformed {
                    path: source,
                    reason: format!("duplicate column '{}'", header),
                });
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(InventoryError::SourceMalformed {
                    path: source,
                    reason: format!(
                        "row {} has {} fields, header has {}",
                        i + 1,
                        row.len(),
                        headers.len()
                    ),
                });
            }
        }

        Ok(Self {
            source,
            headers,
            rows,
            na_values: Vec::new(),
        })
    }

    /// Adds extra tokens that read as null.
    pub fn with_na_values(mut self, values: impl IntoIterator<Item = String>) -> Self {
        self.na_values.extend(values);
        self
    }

    /// Source identifier (usually the file path)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a cell reads as null.
    pub fn is_null(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        NA_TOKENS.contains(&trimmed) || self.na_values.iter().any(|na| na == trimmed)
    }

    /// Parses a column as nullable numbers.
    ///
    /// # Errors
    ///
    /// - `ColumnMissing` if the header has no such column
    /// - `InvalidValue` if a non-null cell is not a finite number (row is
    ///   1-based)
    pub fn numeric_column(&self, name: &str) -> InventoryResult<NumericColumn> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| InventoryError::column_missing(name))?;

        let mut values = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let cell = &row[idx];
            if self.is_null(cell) {
                values.push(None);
                continue;
            }
            let value = cell
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| InventoryError::InvalidValue {
                    column: name.to_string(),
                    row: i + 1,
                    value: cell.clone(),
                })?;
            values.push(Some(value));
        }

        Ok(NumericColumn {
            name: name.to_string(),
            values,
        })
    }

    /// Returns a new table holding only the rows where `mask` is true.
    ///
    /// Row order is preserved. The mask must be aligned with the rows.
    pub fn select(&self, mask: &[bool]) -> InventoryTable {
        debug_assert_eq!(mask.len(), self.rows.len());
        let rows = self
            .rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.clone())
            .collect();

        InventoryTable {
            source: self.source.clone(),
            headers: self.headers.clone(),
            rows,
            na_values: self.na_values.clone(),
        }
    }
}

/// A column parsed into nullable numbers, aligned with the table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    name: String,
    values: Vec<Option<f64>>,
}

impl NumericColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest non-null value; NaN values are skipped.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .flatten()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                Some(m) if m >= v => Some(m),
                _ => Some(v),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn sample() -> InventoryTable {
        InventoryTable::new(
            "sample.csv",
            strings(&["subject", "non_nan_count", "missing"]),
            vec![
                strings(&["S01", "5", ""]),
                strings(&["S02", "0", "1"]),
                strings(&["S03", "3.0", "NaN"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_header_rejected() {
        let err = InventoryTable::new("dup.csv", strings(&["a", "a"]), vec![]).unwrap_err();
        assert_eq!(err.code(), "INV_SOURCE_MALFORMED");
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = InventoryTable::new(
            "ragged.csv",
            strings(&["a", "b"]),
            vec![strings(&["1"])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("row 1 has 1 fields"));
    }

    #[test]
    fn test_numeric_column_nulls() {
        let table = sample();
        let missing = table.numeric_column("missing").unwrap();
        assert_eq!(missing.values(), &[None, Some(1.0), None]);
    }

    #[test]
    fn test_numeric_column_missing() {
        let table = sample();
        let err = table.numeric_column("complete").unwrap_err();
        assert_eq!(err, InventoryError::column_missing("complete"));
    }

    #[test]
    fn test_numeric_column_invalid_value() {
        let table = InventoryTable::new(
            "bad.csv",
            strings(&["complete"]),
            vec![strings(&["2"]), strings(&["done"])],
        )
        .unwrap();
        match table.numeric_column("complete").unwrap_err() {
            InventoryError::InvalidValue { column, row, value } => {
                assert_eq!(column, "complete");
                assert_eq!(row, 2);
                assert_eq!(value, "done");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_column_rejects_infinity() {
        let table = InventoryTable::new(
            "inf.csv",
            strings(&["non_nan_count"]),
            vec![strings(&["3"]), strings(&["inf"]), strings(&["-Infinity"])],
        )
        .unwrap();
        match table.numeric_column("non_nan_count").unwrap_err() {
            InventoryError::InvalidValue { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "inf");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extra_na_values() {
        let table = InventoryTable::new(
            "na.csv",
            strings(&["missing"]),
            vec![strings(&["-"]), strings(&["0"])],
        )
        .unwrap()
        .with_na_values(vec!["-".to_string()]);
        let missing = table.numeric_column("missing").unwrap();
        assert_eq!(missing.values(), &[None, Some(0.0)]);
    }

    #[test]
    fn test_max_skips_nulls() {
        let table = InventoryTable::new(
            "max.csv",
            strings(&["non_nan_count"]),
            vec![strings(&["3"]), strings(&[""]), strings(&["10"])],
        )
        .unwrap();
        assert_eq!(table.numeric_column("non_nan_count").unwrap().max(), Some(10.0));
    }

    #[test]
    fn test_max_all_null() {
        let table = InventoryTable::new(
            "max.csv",
            strings(&["non_nan_count"]),
            vec![strings(&[""])],
        )
        .unwrap();
        assert_eq!(table.numeric_column("non_nan_count").unwrap().max(), None);
    }

    #[test]
    fn test_select_preserves_order_and_text() {
        let table = sample();
        let selected = table.select(&[true, false, true]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.rows()[0][0], "S01");
        assert_eq!(selected.rows()[1][1], "3.0");
        assert_eq!(selected.headers(), table.headers());
        assert_eq!(table.len(), 3);
    }
}
