//! CSV ingestion.
//!
//! The first record is the header. A column is numeric when every
//! non-missing cell parses as a float, otherwise categorical.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::{Column, Table};
use crate::error::Result;

/// Cell spellings treated as missing (compared case-insensitively).
const MISSING_MARKERS: [&str; 8] = ["", "na", "n/a", "nan", "-nan", "null", "none", "#n/a"];

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(cell))
}

fn infer_column(name: &str, cells: Vec<String>) -> Column {
    let numeric: Option<Vec<f64>> = cells
        .iter()
        .map(|cell| if is_missing(cell) { Some(f64::NAN) } else { cell.trim().parse::<f64>().ok() })
        .collect();

    match numeric {
        Some(values) => Column::numeric(name, values),
        None => Column::categorical(
            name,
            cells.into_iter().map(|cell| (!is_missing(&cell)).then_some(cell)).collect(),
        ),
    }
}

impl Table {
    /// Load a table from CSV text read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed CSV (including ragged rows) or duplicate
    /// header names.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in rdr.records() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record.iter()) {
                column.push(cell.to_string());
            }
        }

        let mut table = Table::new();
        for (name, column_cells) in headers.iter().zip(cells) {
            table.add_column(infer_column(name, column_cells))?;
        }

        info!(rows = table.row_count(), columns = table.column_count(), "loaded CSV table");
        Ok(table)
    }

    /// Load a table from a CSV string.
    ///
    /// # Errors
    ///
    /// See [`Table::from_csv_reader`].
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes())
    }

    /// Load a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, otherwise see
    /// [`Table::from_csv_reader`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }
}
