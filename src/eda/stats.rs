//! Column descriptions.

use std::fmt;

use indexmap::IndexMap;

use crate::table::{Column, ColumnData, ColumnKind};

/// Linear-interpolated percentile of sorted data, `p` in [0, 100].
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0) * (sorted.len() - 1) as f64;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;

    if f == c || c >= sorted.len() {
        sorted[f.min(sorted.len() - 1)]
    } else {
        let d = k - f as f64;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}

/// Statistics of a numeric column, ignoring NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    /// Non-NaN values.
    pub count: usize,
    /// Mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std: f64,
    /// Minimum.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Maximum.
    pub max: f64,
}

impl NumericSummary {
    /// Summarize `values`.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            let nan = f64::NAN;
            return Self { count, mean: nan, std: nan, min: nan, q25: nan, median: nan, q75: nan, max: nan };
        };

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let ss: f64 = sorted.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min,
            q25: percentile(&sorted, 25.0),
            median: percentile(&sorted, 50.0),
            q75: percentile(&sorted, 75.0),
            max,
        }
    }
}

/// Frequency statistics of a categorical column, ignoring missing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalSummary {
    /// Non-missing values.
    pub count: usize,
    /// Distinct values.
    pub unique: usize,
    /// Most frequent value; ties go to the first seen.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
}

impl CategoricalSummary {
    /// Summarize `values`.
    #[must_use]
    pub fn from_values(values: &[Option<String>]) -> Self {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value.as_str()).or_default() += 1;
        }

        let mut top: Option<(&str, usize)> = None;
        for (&value, &n) in &counts {
            if top.map_or(true, |(_, best)| n > best) {
                top = Some((value, n));
            }
        }

        Self {
            count: counts.values().sum(),
            unique: counts.len(),
            top: top.map(|(v, _)| v.to_string()),
            freq: top.map_or(0, |(_, n)| n),
        }
    }
}

/// Summary by column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    /// Numeric column.
    Numeric(NumericSummary),
    /// Categorical column.
    Categorical(CategoricalSummary),
}

/// A described column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescription {
    /// Column name.
    pub name: String,
    /// Declared kind.
    pub kind: ColumnKind,
    /// Statistics.
    pub summary: Summary,
}

/// Describe one column.
#[must_use]
pub fn describe_column(column: &Column) -> ColumnDescription {
    let summary = match column.data() {
        ColumnData::Numeric(v) => Summary::Numeric(NumericSummary::from_values(v)),
        ColumnData::Categorical(v) => Summary::Categorical(CategoricalSummary::from_values(v)),
    };
    ColumnDescription { name: column.name().to_string(), kind: column.kind(), summary }
}

fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.4}")
    }
}

impl fmt::Display for ColumnDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.kind)?;
        match &self.summary {
            Summary::Numeric(s) => {
                writeln!(f, "  {:<7}{}", "count", s.count)?;
                for (label, value) in [
                    ("mean", s.mean),
                    ("std", s.std),
                    ("min", s.min),
                    ("25%", s.q25),
                    ("50%", s.median),
                    ("75%", s.q75),
                    ("max", s.max),
                ] {
                    writeln!(f, "  {label:<7}{}", fmt_stat(value))?;
                }
            }
            Summary::Categorical(s) => {
                writeln!(f, "  {:<7}{}", "count", s.count)?;
                writeln!(f, "  {:<7}{}", "unique", s.unique)?;
                writeln!(f, "  {:<7}{}", "top", s.top.as_deref().unwrap_or("NaN"))?;
                writeln!(f, "  {:<7}{}", "freq", s.freq)?;
            }
        }
        Ok(())
    }
}
