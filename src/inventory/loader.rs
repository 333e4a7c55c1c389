//! Source loading
//!
//! Sources are delimited text with a header row. Each source is read whole
//! into an `InventoryTable`; nothing is kept between loads.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{InventoryError, InventoryResult};
use super::table::InventoryTable;

/// Options controlling how sources are parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field delimiter (single byte)
    pub delimiter: u8,
    /// Extra tokens to read as null
    pub na_values: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: Vec::new(),
        }
    }
}

impl ReadOptions {
    /// Parses a table from any reader.
    ///
    /// `source` names the table in errors and reports.
    pub fn read<R: Read>(&self, source: &str, reader: R) -> InventoryResult<InventoryTable> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| csv_error(source, e))?
            .iter()
            .map(String::from)
            .collect();

        if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
            return Err(InventoryError::SourceMalformed {
                path: source.to_string(),
                reason: "no header row".to_string(),
            });
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| csv_error(source, e))?;
            let mut row: Vec<String> = record.iter().map(String::from).collect();
            // Short rows read as trailing nulls; long rows stay malformed.
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        Ok(InventoryTable::new(source, headers, rows)?.with_na_values(self.na_values.clone()))
    }
}

fn csv_error(source: &str, e: csv::Error) -> InventoryError {
    if e.is_io_error() {
        InventoryError::SourceRead {
            path: source.to_string(),
            reason: e.to_string(),
        }
    } else {
        InventoryError::SourceMalformed {
            path: source.to_string(),
            reason: e.to_string(),
        }
    }
}

/// Loads inventory sources by identifier.
///
/// The batch runner only sees this trait, so tests can serve tables from
/// memory instead of the filesystem.
pub trait SourceLoader {
    fn load(&self, source: &Path) -> InventoryResult<InventoryTable>;
}

/// Loads sources from local files.
#[derive(Debug, Clone, Default)]
pub struct FileSourceLoader {
    options: ReadOptions,
}

impl FileSourceLoader {
    pub fn new(options: ReadOptions) -> Self {
        Self { options }
    }
}

impl SourceLoader for FileSourceLoader {
    fn load(&self, source: &Path) -> InventoryResult<InventoryTable> {
        let name = source.display().to_string();
        let file = File::open(source).map_err(|e| InventoryError::SourceRead {
            path: name.clone(),
            reason: e.to_string(),
        })?;
        self.options.read(&name, BufReader::new(file))
    }
}
