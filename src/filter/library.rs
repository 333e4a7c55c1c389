//! Built-in inventory filters
//!
//! Each filter reads only the columns in its formula and fails with
//! `ColumnMissing` if one of them is absent. Null cells never satisfy `>`,
//! `<` or `==`, and always satisfy `!=`.

use crate::inventory::{
    InventoryResult, InventoryTable, NumericColumn, COMPLETE, EXCLUDE, MISSING, NON_NAN_COUNT,
};

use super::Mask;

/// Completion code for a finalized form.
const COMPLETE_CODE: f64 = 2.0;

/// Has content, but no missingness decision was recorded.
///
/// `non_nan_count > 0 AND missing is null`
pub fn probably_not_missing_but_unmarked(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let missing = inventory.numeric_column(MISSING)?;
    Ok(combine(&count, &missing, |c, m| gt(c, 0.0) && m.is_none()))
}

/// No content, yet explicitly marked present.
///
/// `non_nan_count == 0 AND missing == 0`
pub fn probably_missing_but_marked_present(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let missing = inventory.numeric_column(MISSING)?;
    Ok(combine(&count, &missing, |c, m| eq(c, 0.0) && eq(m, 0.0)))
}

/// No content and no missingness decision.
///
/// `non_nan_count == 0 AND missing is null`
pub fn probably_missing_but_unmarked(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let missing = inventory.numeric_column(MISSING)?;
    Ok(combine(&count, &missing, |c, m| eq(c, 0.0) && m.is_none()))
}

/// `non_nan_count > 0 AND complete < 2`
pub fn content_not_marked_complete(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let complete = inventory.numeric_column(COMPLETE)?;
    Ok(combine(&count, &complete, |c, s| {
        gt(c, 0.0) && lt(s, COMPLETE_CODE)
    }))
}

/// `missing == 1 AND complete < 2`
pub fn missing_not_marked_complete(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let missing = inventory.numeric_column(MISSING)?;
    let complete = inventory.numeric_column(COMPLETE)?;
    Ok(combine(&missing, &complete, |m, s| {
        eq(m, 1.0) && lt(s, COMPLETE_CODE)
    }))
}

/// Content present, but less than the richest instance in the same source.
///
/// `non_nan_count > 0 AND non_nan_count < max(non_nan_count)`
///
/// The maximum is taken over this table only.
pub fn less_content_than_max(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let max = count.max();
    Ok(count
        .values()
        .iter()
        .map(|&c| match max {
            Some(max) => gt(c, 0.0) && lt(c, max),
            None => false,
        })
        .collect())
}

/// Marked missing even though the form has content.
///
/// `missing == 1 AND non_nan_count > 0`
pub fn has_content_but_marked_missing(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let missing = inventory.numeric_column(MISSING)?;
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    Ok(combine(&missing, &count, |m, c| eq(m, 1.0) && gt(c, 0.0)))
}

/// Empties not yet finalized; mostly useful before a data release.
///
/// `non_nan_count == 0 AND complete != 2`
pub fn empty_and_not_complete(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let complete = inventory.numeric_column(COMPLETE)?;
    Ok(combine(&count, &complete, |c, s| {
        eq(c, 0.0) && !eq(s, COMPLETE_CODE)
    }))
}

/// Empties that may simply be unfilled rather than excluded.
///
/// `non_nan_count == 0 AND exclude != 1`
pub fn empty_and_not_ignored(inventory: &InventoryTable) -> InventoryResult<Mask> {
    let count = inventory.numeric_column(NON_NAN_COUNT)?;
    let exclude = inventory.numeric_column(EXCLUDE)?;
    Ok(combine(&count, &exclude, |c, x| eq(c, 0.0) && !eq(x, 1.0)))
}

fn combine<F>(left: &NumericColumn, right: &NumericColumn, f: F) -> Mask
where
    F: Fn(Option<f64>, Option<f64>) -> bool,
{
    left.values()
        .iter()
        .zip(right.values())
        .map(|(&l, &r)| f(l, r))
        .collect()
}

fn gt(value: Option<f64>, bound: f64) -> bool {
    matches!(value, Some(v) if v > bound)
}

fn lt(value: Option<f64>, bound: f64) -> bool {
    matches!(value, Some(v) if v < bound)
}

fn eq(value: Option<f64>, target: f64) -> bool {
    matches!(value, Some(v) if v == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryError;

    /// Builds a table with the four annotation columns.
    /// Each row is (non_nan_count, missing, complete, exclude); "" is null.
    fn inventory(rows: &[(&str, &str, &str, &str)]) -> InventoryTable {
        let headers = ["subject", NON_NAN_COUNT, MISSING, COMPLETE, EXCLUDE]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, (count, missing, complete, exclude))| {
                vec![
                    format!("S{:02}", i),
                    count.to_string(),
                    missing.to_string(),
                    complete.to_string(),
                    exclude.to_string(),
                ]
            })
            .collect();
        InventoryTable::new("test.csv", headers, rows).unwrap()
    }

    #[test]
    fn test_probably_not_missing_but_unmarked() {
        let inv = inventory(&[("5", "", "1", "0"), ("5", "0", "1", "0"), ("0", "", "1", "0")]);
        assert_eq!(
            probably_not_missing_but_unmarked(&inv).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_probably_missing_but_marked_present() {
        let inv = inventory(&[("0", "0", "2", "0"), ("0", "1", "2", "0"), ("1", "0", "2", "0")]);
        assert_eq!(
            probably_missing_but_marked_present(&inv).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_probably_missing_but_unmarked() {
        let inv = inventory(&[("0", "", "0", "0"), ("0", "0", "0", "0"), ("2", "", "0", "0")]);
        assert_eq!(
            probably_missing_but_unmarked(&inv).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_content_not_marked_complete() {
        let inv = inventory(&[("3", "0", "1", "0"), ("3", "0", "2", "0"), ("3", "0", "", "0"), ("0", "0", "0", "0")]);
        assert_eq!(
            content_not_marked_complete(&inv).unwrap(),
            vec![true, false, false, false]
        );
    }

    #[test]
    fn test_missing_not_marked_complete() {
        let inv = inventory(&[("0", "1", "0", "0"), ("0", "1", "2", "0"), ("0", "0", "0", "0")]);
        assert_eq!(
            missing_not_marked_complete(&inv).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_less_content_than_max() {
        let inv = inventory(&[("3", "", "", ""), ("10", "", "", ""), ("0", "", "", "")]);
        assert_eq!(less_content_than_max(&inv).unwrap(), vec![true, false, false]);
    }

    #[test]
    fn test_less_content_than_max_all_equal() {
        let inv = inventory(&[("4", "", "", ""), ("4", "", "", "")]);
        assert_eq!(less_content_than_max(&inv).unwrap(), vec![false, false]);
    }

    #[test]
    fn test_has_content_but_marked_missing() {
        let inv = inventory(&[("7", "1", "2", "0"), ("0", "1", "2", "0"), ("7", "", "2", "0")]);
        assert_eq!(
            has_content_but_marked_missing(&inv).unwrap(),
            vec![true, false, false]
        );
    }

    #[test]
    fn test_empty_and_not_complete_null_complete_selected() {
        let inv = inventory(&[("0", "", "0", "0"), ("0", "", "2", "0"), ("0", "", "", "0")]);
        assert_eq!(
            empty_and_not_complete(&inv).unwrap(),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_empty_and_not_ignored() {
        let inv = inventory(&[("0", "", "0", "0"), ("0", "", "0", "1"), ("0", "", "0", ""), ("2", "", "0", "0")]);
        assert_eq!(
            empty_and_not_ignored(&inv).unwrap(),
            vec![true, false, true, false]
        );
    }

    #[test]
    fn test_missing_column_reported() {
        let inv = InventoryTable::new(
            "partial.csv",
            vec![NON_NAN_COUNT.to_string()],
            vec![vec!["5".to_string()]],
        )
        .unwrap();
        assert_eq!(
            probably_not_missing_but_unmarked(&inv).unwrap_err(),
            InventoryError::column_missing(MISSING)
        );
    }

    #[test]
    fn test_filter_only_reads_named_columns() {
        // No complete/exclude columns; this filter does not need them.
        let inv = InventoryTable::new(
            "narrow.csv",
            vec![NON_NAN_COUNT.to_string(), MISSING.to_string()],
            vec![vec!["0".to_string(), "0".to_string()]],
        )
        .unwrap();
        assert_eq!(probably_missing_but_marked_present(&inv).unwrap(), vec![true]);
    }

    #[test]
    fn test_float_encoded_counts() {
        let inv = inventory(&[("5.0", "", "1.0", "0.0")]);
        assert_eq!(probably_not_missing_but_unmarked(&inv).unwrap(), vec![true]);
        assert_eq!(content_not_marked_complete(&inv).unwrap(), vec![true]);
    }
}
