//! Row grouping by color column.
//!
//! A categorical color column splits the rows into one group per distinct
//! value, in first-seen order. Anything else yields a single group covering
//! every row. Either way each row lands in exactly one group.

use crate::error::Result;
use crate::figure::Marker;
use crate::scale::Colorscale;
use indexmap::IndexMap;

use crate::table::{ColumnData, Table};

use super::gather;

/// How the color column encodes the points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMode<'a> {
    /// No color column.
    Uniform,
    /// Numeric color column mapped through a colorscale.
    Continuous {
        /// Column name (the colorbar title).
        column: &'a str,
        /// Column values.
        values: &'a [f64],
    },
    /// Categorical color column; one trace per value.
    Categorical {
        /// Column name.
        column: &'a str,
    },
}

impl ColorMode<'_> {
    /// Continuous color for `rows`, falling back to `fallback` when there is
    /// no color column. Categorical groups are left to the renderer's
    /// per-trace default color.
    pub(crate) fn apply(
        &self,
        marker: Marker,
        rows: &[usize],
        fallback: (&str, &[f64]),
        colorscale: Colorscale,
    ) -> Marker {
        match *self {
            ColorMode::Uniform => {
                marker.continuous(gather(fallback.1, rows), fallback.0, colorscale)
            }
            ColorMode::Continuous { column, values } => {
                marker.continuous(gather(values, rows), column, colorscale)
            }
            ColorMode::Categorical { .. } => marker,
        }
    }
}

/// One partition of the table rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Legend label (categorical groups only).
    pub label: Option<String>,
    /// Row indices in table order.
    pub rows: Vec<usize>,
}

/// Rows partitioned by color column.
#[derive(Debug, Clone, PartialEq)]
pub struct Grouping<'a> {
    /// Color encoding.
    pub mode: ColorMode<'a>,
    /// Groups in emission order.
    pub groups: Vec<Group>,
}

/// Partition the rows of `table` by the optional color column.
///
/// # Errors
///
/// Returns [`crate::Error::ColumnNotFound`] if `color` names no column.
pub fn group_rows<'a>(table: &'a Table, color: Option<&'a str>) -> Result<Grouping<'a>> {
    let all = || Group { label: None, rows: (0..table.row_count()).collect() };

    let Some(name) = color else {
        return Ok(Grouping { mode: ColorMode::Uniform, groups: vec![all()] });
    };

    let column = table.column(name)?;
    if let ColumnData::Numeric(values) = column.data() {
        return Ok(Grouping {
            mode: ColorMode::Continuous { column: column.name(), values },
            groups: vec![all()],
        });
    }

    let mut partition: IndexMap<Option<&str>, Vec<usize>> = IndexMap::new();
    for (row, value) in column.values().enumerate() {
        partition.entry(value.as_str()).or_default().push(row);
    }

    let groups = partition
        .into_iter()
        .map(|(label, rows)| Group { label: Some(label.unwrap_or("nan").to_string()), rows })
        .collect();

    Ok(Grouping { mode: ColorMode::Categorical { column: column.name() }, groups })
}
