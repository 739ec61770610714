//! Default axis selection and color-column menu.
//!
//! Front ends offer the numeric columns as axis candidates and a combined
//! color menu: `"None"`, each categorical column, then each numeric column
//! prefixed with `"[Numeric] "`.

use crate::table::{ColumnKind, Table};

/// Menu entry meaning "no color column".
pub const NO_COLOR: &str = "None";

/// Prefix marking numeric entries in the color menu.
pub const NUMERIC_PREFIX: &str = "[Numeric] ";

/// Axis columns picked for a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisSelection {
    /// X column.
    pub x: String,
    /// Y column.
    pub y: String,
    /// Z column.
    pub z: String,
    /// Size column, when a fourth numeric column exists.
    pub size: Option<String>,
}

impl AxisSelection {
    /// First three numeric columns as x, y, z and the fourth, if any, as size.
    ///
    /// Returns `None` when the table has fewer than three numeric columns.
    #[must_use]
    pub fn defaults(table: &Table) -> Option<Self> {
        let numeric = table.columns_of_kind(ColumnKind::Numeric);
        let [x, y, z, rest @ ..] = numeric.as_slice() else {
            return None;
        };
        Some(Self {
            x: (*x).to_string(),
            y: (*y).to_string(),
            z: (*z).to_string(),
            size: rest.first().map(|s| (*s).to_string()),
        })
    }
}

/// Color menu entries in display order.
#[must_use]
pub fn color_options(table: &Table) -> Vec<String> {
    std::iter::once(NO_COLOR.to_string())
        .chain(table.columns_of_kind(ColumnKind::Categorical).into_iter().map(str::to_string))
        .chain(
            table
                .columns_of_kind(ColumnKind::Numeric)
                .into_iter()
                .map(|c| format!("{NUMERIC_PREFIX}{c}")),
        )
        .collect()
}

/// A parsed color menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorChoice {
    /// No color column.
    None,
    /// Categorical column.
    Categorical(String),
    /// Numeric column.
    Numeric(String),
}

impl ColorChoice {
    /// Parse a color menu entry.
    #[must_use]
    pub fn parse(option: &str) -> Self {
        if option == NO_COLOR || option.is_empty() {
            ColorChoice::None
        } else if let Some(column) = option.strip_prefix(NUMERIC_PREFIX) {
            ColorChoice::Numeric(column.to_string())
        } else {
            ColorChoice::Categorical(option.to_string())
        }
    }

    /// Color column name, if any.
    #[must_use]
    pub fn column(&self) -> Option<&str> {
        match self {
            ColorChoice::None => None,
            ColorChoice::Categorical(c) | ColorChoice::Numeric(c) => Some(c),
        }
    }
}
