//! Delimited-text output

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;

use super::errors::{AggregateError, AggregateResult};
use super::table::AggregateTable;

/// Output formatting options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Field delimiter (single byte)
    pub delimiter: u8,
    /// Render `5.0`-style cells as `5`
    pub normalize_integers: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            normalize_integers: true,
        }
    }
}

fn integral_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(-?[0-9]+)\.0*$").expect("integral pattern compiles"))
}

/// Renders one output cell.
///
/// Only cells that are an integer followed by a zero fraction change;
/// everything else is written as read.
pub fn render_cell<'c>(cell: &'c str, options: &WriteOptions) -> Cow<'c, str> {
    if !options.normalize_integers {
        return Cow::Borrowed(cell);
    }
    match integral_pattern().captures(cell).and_then(|c| c.get(1)) {
        Some(int) if int.as_str() == "-0" => Cow::Borrowed("0"),
        Some(int) => Cow::Borrowed(int.as_str()),
        None => Cow::Borrowed(cell),
    }
}

/// Writes a table with a header row.
///
/// `target` names the destination in errors.
pub fn write_table<W: Write>(
    table: &AggregateTable,
    mut writer: W,
    target: &str,
    options: &WriteOptions,
) -> AggregateResult<()> {
    if table.columns().is_empty() {
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| AggregateError::write(target, e))?;
        return Ok(());
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    wtr.write_record(table.columns())
        .map_err(|e| AggregateError::write(target, e))?;

    for row in table.rows() {
        let cells: Vec<Cow<'_, str>> = row.iter().map(|c| render_cell(c, options)).collect();
        wtr.write_record(cells.iter().map(|c| c.as_bytes()))
            .map_err(|e| AggregateError::write(target, e))?;
    }

    wtr.flush().map_err(|e| AggregateError::write(target, e))
}

/// Where the aggregated table goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// No path, or `-`, means stdout.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if p.as_os_str() != "-" => OutputTarget::File(p),
            _ => OutputTarget::Stdout,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            OutputTarget::Stdout => "stdout".to_string(),
            OutputTarget::File(p) => p.display().to_string(),
        }
    }

    /// Writes the table to this target, creating or truncating a file.
    pub fn write(&self, table: &AggregateTable, options: &WriteOptions) -> AggregateResult<()> {
        let name = self.display_name();
        match self {
            OutputTarget::Stdout => write_table(table, io::stdout().lock(), &name, options),
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|e| AggregateError::write(&name, e))?;
                write_table(table, BufWriter::new(file), &name, options)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::inventory::ReadOptions;
    use tempfile::tempdir;

    fn merged(data: &str) -> AggregateTable {
        let table = ReadOptions::default().read("mem", data.as_bytes()).unwrap();
        aggregate(&[table], &[])
    }

    fn render(table: &AggregateTable, options: &WriteOptions) -> String {
        let mut out = Vec::new();
        write_table(table, &mut out, "buffer", options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_cell_integral() {
        let options = WriteOptions::default();
        assert_eq!(render_cell("5.0", &options), "5");
        assert_eq!(render_cell("12.000", &options), "12");
        assert_eq!(render_cell("-3.0", &options), "-3");
        assert_eq!(render_cell("-0.0", &options), "0");
        assert_eq!(render_cell("7", &options), "7");
    }

    #[test]
    fn test_render_cell_leaves_other_values() {
        let options = WriteOptions::default();
        assert_eq!(render_cell("2.5", &options), "2.5");
        assert_eq!(render_cell("007", &options), "007");
        assert_eq!(render_cell("NCANDA_S00033", &options), "NCANDA_S00033");
        assert_eq!(render_cell("", &options), "");
        assert_eq!(render_cell("1e3", &options), "1e3");
        assert_eq!(render_cell("\u{665}.0", &options), "\u{665}.0");
    }

    #[test]
    fn test_render_cell_disabled() {
        let options = WriteOptions {
            normalize_integers: false,
            ..WriteOptions::default()
        };
        assert_eq!(render_cell("5.0", &options), "5.0");
    }

    #[test]
    fn test_write_table() {
        let table = merged("subject,non_nan_count,missing\nS1,5.0,\nS2,3,0\n");
        let out = render(&table, &WriteOptions::default());
        assert_eq!(out, "subject,non_nan_count,missing\nS1,5,\nS2,3,0\n");
    }

    #[test]
    fn test_write_header_only() {
        let table = aggregate(&[], &["subject".to_string(), "missing".to_string()]);
        let out = render(&table, &WriteOptions::default());
        assert_eq!(out, "subject,missing\n");
    }

    #[test]
    fn test_write_no_columns() {
        let out = render(&AggregateTable::default(), &WriteOptions::default());
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_write_quotes_delimiters() {
        let table = merged("subject,note\nS1,\"a, b\"\n");
        let out = render(&table, &WriteOptions::default());
        assert_eq!(out, "subject,note\nS1,\"a, b\"\n");
    }

    #[test]
    fn test_write_tab_delimited() {
        let table = merged("subject,missing\nS1,1\n");
        let options = WriteOptions {
            delimiter: b'\t',
            ..WriteOptions::default()
        };
        assert_eq!(render(&table, &options), "subject\tmissing\nS1\t1\n");
    }

    #[test]
    fn test_output_target_from_arg() {
        assert_eq!(OutputTarget::from_arg(None), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::from_arg(Some(PathBuf::from("-"))),
            OutputTarget::Stdout
        );
        assert_eq!(
            OutputTarget::from_arg(Some(PathBuf::from("out.csv"))),
            OutputTarget::File(PathBuf::from("out.csv"))
        );
    }

    #[test]
    fn test_output_target_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("filtered.csv");
        let table = merged("subject,missing\nS1,1\n");

        OutputTarget::File(path.clone())
            .write(&table, &WriteOptions::default())
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "subject,missing\nS1,1\n");
    }

    #[test]
    fn test_output_target_unwritable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        let err = OutputTarget::File(path)
            .write(&AggregateTable::default(), &WriteOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "INV_OUTPUT_WRITE");
        assert!(err.to_string().contains("no_such_dir"));
    }
}
