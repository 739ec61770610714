//! Error types for eda3d operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading tables, describing them, or building charts.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// A referenced column does not exist in the table.
    #[error("Column \"{0}\" not found")]
    ColumnNotFound(String),

    /// A column that must be numeric is categorical.
    #[error("Column \"{0}\" is not numeric")]
    NotNumeric(String),

    /// Two columns share the same name.
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// A column's length disagrees with the table's row count.
    #[error("Column \"{column}\" has {actual} rows, table has {expected}")]
    RowCountMismatch {
        /// Column being added.
        column: String,
        /// Row count of the table.
        expected: usize,
        /// Row count of the column.
        actual: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A style option lies outside its accepted range.
    #[error("Style option '{option}' = {value} is outside [{min}, {max}]")]
    StyleOutOfRange {
        /// Option name.
        option: &'static str,
        /// Supplied value.
        value: f32,
        /// Lower bound (inclusive).
        min: f32,
        /// Upper bound (inclusive).
        max: f32,
    },

    /// Colorscale name is not one of the supported palettes.
    #[error("Unknown colorscale: {0}")]
    UnknownColorscale(String),

    /// Chart kind name is not recognized.
    #[error("Unknown chart kind: {0}")]
    UnknownChartKind(String),

    /// A size column is required for this chart kind.
    #[error("{0} requires a size column")]
    SizeColumnRequired(&'static str),

    /// Size values cannot be turned into marker sizes.
    #[error("Size column \"{column}\" is unsupported: {reason}")]
    UnsupportedSize {
        /// Size column name.
        column: String,
        /// Why the values were rejected.
        reason: &'static str,
    },

    /// Surface reshape cannot fill the grid.
    #[error(
        "Cannot reshape {rows} values into a {unique_y}x{unique_x} surface grid \
         ({unique_x} unique X values, {unique_y} unique Y values)"
    )]
    ShapeMismatch {
        /// Distinct x values.
        unique_x: usize,
        /// Distinct y values.
        unique_y: usize,
        /// Rows available.
        rows: usize,
    },

    /// Invalid scale domain or size reference.
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// EDA command text did not match any known command.
    #[error("Unknown EDA command \"{0}\". Try: show summary, describe column <col>, show columns.")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ColumnNotFound("price".to_string());
        assert_eq!(err.to_string(), "Column \"price\" not found");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::ShapeMismatch { unique_x: 3, unique_y: 3, rows: 3 };
        let msg = err.to_string();
        assert!(msg.contains("3 unique X values"));
        assert!(msg.contains("3x3"));
    }

    #[test]
    fn test_style_out_of_range() {
        let err = Error::StyleOutOfRange { option: "opacity", value: 1.5, min: 0.1, max: 1.0 };
        assert!(err.to_string().contains("opacity"));
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let err = Error::UnknownCommand("plot everything".into());
        assert!(err.to_string().contains("describe column <col>"));
    }
}
