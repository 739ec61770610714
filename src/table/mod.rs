//! Columnar table with explicitly typed columns.
//!
//! Column kind (numeric or categorical) is fixed when the column is created,
//! so chart code never inspects cell values to decide how to encode a column.
//! All columns of a [`Table`] have the same length.

mod loader;

use std::fmt;

use crate::error::{Error, Result};

/// Declared kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Floating-point values; missing cells are NaN.
    Numeric,
    /// Text values; missing cells are `None`.
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => f.write_str("numeric"),
            ColumnKind::Categorical => f.write_str("categorical"),
        }
    }
}

/// Column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Numeric values.
    Numeric(Vec<f64>),
    /// Categorical values.
    Categorical(Vec<Option<String>>),
}

/// A borrowed cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(&'a str),
    /// A missing value (NaN or absent text).
    Missing,
}

impl<'a> Value<'a> {
    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string, borrowed from the column.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for NaN and absent text.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Missing => f.write_str("nan"),
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a numeric column.
    #[must_use]
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), data: ColumnData::Numeric(values) }
    }

    /// Create a categorical column.
    #[must_use]
    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self { name: name.into(), data: ColumnData::Categorical(values) }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    /// Underlying storage.
    #[must_use]
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    /// Returns true if the column has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell value at `row`, or `Missing` when out of range.
    #[must_use]
    pub fn value(&self, row: usize) -> Value<'_> {
        match &self.data {
            ColumnData::Numeric(v) => match v.get(row) {
                Some(n) if !n.is_nan() => Value::Number(*n),
                _ => Value::Missing,
            },
            ColumnData::Categorical(v) => match v.get(row) {
                Some(Some(s)) => Value::Text(s),
                _ => Value::Missing,
            },
        }
    }

    /// Iterate over all cell values.
    pub fn values(&self) -> impl Iterator<Item = Value<'_>> + '_ {
        (0..self.len()).map(|row| self.value(row))
    }

    /// Numeric values, or [`Error::NotNumeric`] for a categorical column.
    pub fn as_numeric(&self) -> Result<&[f64]> {
        match &self.data {
            ColumnData::Numeric(v) => Ok(v),
            ColumnData::Categorical(_) => Err(Error::NotNumeric(self.name.clone())),
        }
    }
}

/// An ordered collection of equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the length differs from the
    /// existing columns.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::DuplicateColumn(column.name.clone()));
        }

        if !self.columns.is_empty() && column.len() != self.n_rows {
            return Err(Error::RowCountMismatch {
                column: column.name.clone(),
                expected: self.n_rows,
                actual: column.len(),
            });
        }

        self.n_rows = column.len();
        self.columns.push(column);
        Ok(())
    }

    /// Builder-style numeric column.
    ///
    /// # Errors
    ///
    /// See [`Table::add_column`].
    pub fn with_numeric(mut self, name: &str, values: &[f64]) -> Result<Self> {
        self.add_column(Column::numeric(name, values.to_vec()))?;
        Ok(self)
    }

    /// Builder-style categorical column without missing values.
    ///
    /// # Errors
    ///
    /// See [`Table::add_column`].
    pub fn with_categorical(mut self, name: &str, values: &[&str]) -> Result<Self> {
        let values = values.iter().map(|s| Some((*s).to_string())).collect();
        self.add_column(Column::categorical(name, values))?;
        Ok(self)
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Column names in table order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Columns in table order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Names of the columns of `kind`, in table order.
    #[must_use]
    pub fn columns_of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.columns.iter().filter(|c| c.kind() == kind).map(Column::name).collect()
    }

    /// Look up a column by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Numeric values of a column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is missing or categorical.
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        self.column(name)?.as_numeric()
    }

    /// Boolean mask of the rows whose value in `name` satisfies `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if the column does not exist.
    pub fn mask<F>(&self, name: &str, predicate: F) -> Result<Vec<bool>>
    where
        F: Fn(Value<'_>) -> bool,
    {
        Ok(self.column(name)?.values().map(predicate).collect())
    }
}
