//! Text commands for exploratory data analysis.
//!
//! # Syntax
//!
//! ```text
//! show summary | summary | describe   - Describe every column
//! describe column <name>              - Describe one column
//! show columns | columns              - List column names
//! ```
//!
//! Commands are matched case-insensitively; column names keep their case.
//!
//! # Example
//!
//! ```rust
//! use eda3d::eda::{parse_command, EdaCommand};
//!
//! let cmd = parse_command("Describe Column Petal Width").unwrap();
//! assert_eq!(cmd, EdaCommand::DescribeColumn("Petal Width".into()));
//! ```

mod stats;

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::table::Table;

pub use stats::{describe_column, CategoricalSummary, ColumnDescription, NumericSummary, Summary};

/// A parsed EDA command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdaCommand {
    /// Describe every column.
    Summary,
    /// Describe the named column.
    DescribeColumn(String),
    /// List column names.
    Columns,
}

/// Strip `word` from the front of `s`, ignoring ASCII case, and require
/// whitespace or the end of input after it.
fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let head = s.get(..word.len())?;
    if !head.eq_ignore_ascii_case(word) {
        return None;
    }
    let rest = &s[word.len()..];
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim_start())
}

/// Parse a command string.
///
/// # Errors
///
/// Returns [`Error::UnknownCommand`] for anything outside the syntax above,
/// including `describe column` with no name.
pub fn parse_command(input: &str) -> Result<EdaCommand> {
    let trimmed = input.trim();
    let unknown = || Error::UnknownCommand(trimmed.to_string());

    if let Some(rest) = strip_word(trimmed, "describe") {
        if rest.is_empty() {
            return Ok(EdaCommand::Summary);
        }
        let name = strip_word(rest, "column").filter(|n| !n.is_empty()).ok_or_else(unknown)?;
        return Ok(EdaCommand::DescribeColumn(name.to_string()));
    }

    let words: Vec<String> = trimmed.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    match words.as_slice() {
        ["show", "summary"] | ["summary"] => Ok(EdaCommand::Summary),
        ["show", "columns"] | ["columns"] => Ok(EdaCommand::Columns),
        _ => Err(unknown()),
    }
}

/// Output of an EDA command.
#[derive(Debug, Clone, PartialEq)]
pub enum EdaReport {
    /// Every column described, in table order.
    Summary {
        /// Row count.
        rows: usize,
        /// Per-column descriptions.
        columns: Vec<ColumnDescription>,
    },
    /// One column described.
    Column(ColumnDescription),
    /// Column names in table order.
    Columns(Vec<String>),
}

impl fmt::Display for EdaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdaReport::Summary { rows, columns } => {
                writeln!(f, "{rows} rows x {} columns", columns.len())?;
                for description in columns {
                    writeln!(f)?;
                    write!(f, "{description}")?;
                }
                Ok(())
            }
            EdaReport::Column(description) => write!(f, "{description}"),
            EdaReport::Columns(names) => {
                for name in names {
                    writeln!(f, "{name}")?;
                }
                Ok(())
            }
        }
    }
}

/// Run a parsed command against `table`.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`] when `describe column` names a missing
/// column.
pub fn execute(table: &Table, command: &EdaCommand) -> Result<EdaReport> {
    debug!(?command, rows = table.row_count(), "running EDA command");
    Ok(match command {
        EdaCommand::Summary => EdaReport::Summary {
            rows: table.row_count(),
            columns: table.columns().iter().map(describe_column).collect(),
        },
        EdaCommand::DescribeColumn(name) => EdaReport::Column(describe_column(table.column(name)?)),
        EdaCommand::Columns => {
            EdaReport::Columns(table.column_names().into_iter().map(str::to_string).collect())
        }
    })
}

/// Parse and run a command string.
///
/// # Errors
///
/// Returns parse or execution errors.
pub fn run(table: &Table, input: &str) -> Result<EdaReport> {
    execute(table, &parse_command(input)?)
}

/// Load CSV text and run a command, returning the rendered report.
///
/// # Errors
///
/// Returns CSV, parse, or execution errors.
pub fn run_csv(csv_text: &str, input: &str) -> Result<String> {
    let table = Table::from_csv_str(csv_text)?;
    Ok(run(&table, input)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new()
            .with_numeric("Sepal", &[1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .with_categorical("Kind", &["a", "b", "a", "c"])
            .unwrap()
    }

    #[test]
    fn test_parse_summary_variants() {
        for input in ["show summary", "SUMMARY", "  Describe  ", "Show   Summary"] {
            assert_eq!(parse_command(input).unwrap(), EdaCommand::Summary, "{input}");
        }
    }

    #[test]
    fn test_parse_columns_variants() {
        assert_eq!(parse_command("show columns").unwrap(), EdaCommand::Columns);
        assert_eq!(parse_command("Columns").unwrap(), EdaCommand::Columns);
    }

    #[test]
    fn test_parse_describe_column_keeps_case() {
        assert_eq!(
            parse_command("DESCRIBE COLUMN Sepal").unwrap(),
            EdaCommand::DescribeColumn("Sepal".into())
        );
        assert_eq!(
            parse_command("describe column   Petal Width ").unwrap(),
            EdaCommand::DescribeColumn("Petal Width".into())
        );
    }

    #[test]
    fn test_parse_unknown() {
        for input in ["plot it", "describe column", "describecolumn x", "show", ""] {
            let err = parse_command(input).unwrap_err();
            assert!(matches!(err, Error::UnknownCommand(_)), "{input}");
        }
        let msg = parse_command("plot it").unwrap_err().to_string();
        assert!(msg.contains("show summary"));
        assert!(msg.contains("describe column"));
    }

    #[test]
    fn test_parse_non_ascii_is_unknown() {
        assert!(parse_command("déscribe").is_err());
    }

    #[test]
    fn test_execute_columns() {
        let report = run(&table(), "show columns").unwrap();
        assert_eq!(report, EdaReport::Columns(vec!["Sepal".into(), "Kind".into()]));
        assert_eq!(report.to_string(), "Sepal\nKind\n");
    }

    #[test]
    fn test_execute_describe_missing_column() {
        let err = run(&table(), "describe column sepal").unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound(name) if name == "sepal"));
    }

    #[test]
    fn test_execute_summary_display() {
        let text = run(&table(), "summary").unwrap().to_string();
        assert!(text.starts_with("4 rows x 2 columns"));
        assert!(text.contains("Sepal (numeric)"));
        assert!(text.contains("Kind (categorical)"));
    }

    #[test]
    fn test_run_csv() {
        let out = run_csv("a,b\n1,x\n2,y\n", "describe column a").unwrap();
        assert!(out.contains("mean"));
        assert!(out.contains("1.5"));
    }
}
