//! Chart construction.
//!
//! [`build_chart`] turns a [`Table`] and a [`ChartRequest`] into a [`Figure`].
//! Each chart kind lives in its own module; all of them share row grouping
//! (see [`group_rows`]) and the dark [`Theme`] layout.
//!
//! # Example
//!
//! ```rust
//! use eda3d::charts::{build_chart, ChartKind, ChartRequest};
//! use eda3d::table::Table;
//!
//! let table = Table::new()
//!     .with_numeric("x", &[1.0, 2.0, 3.0]).unwrap()
//!     .with_numeric("y", &[1.0, 1.0, 1.0]).unwrap()
//!     .with_numeric("z", &[10.0, 20.0, 30.0]).unwrap();
//!
//! let out = build_chart(&table, &ChartRequest::new(ChartKind::Scatter, "x", "y", "z")).unwrap();
//! assert_eq!(out.figure.trace_count(), 1);
//! ```

mod bar;
mod bubble;
mod custom;
mod grouping;
mod line;
mod scatter;
mod surface;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::figure::{Figure, Marker, PointTrace, Trace};
use crate::style::StyleConfig;
use crate::table::Table;
use crate::theme::Theme;

pub use grouping::{group_rows, ColorMode, Group, Grouping};
pub use surface::{reshape_surface, GridCheck, SurfaceGrid};

// ============================================================================
// Request
// ============================================================================

/// The closed set of chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// One marker per row.
    Scatter,
    /// Surface over the distinct x/y grid.
    Surface,
    /// One bar per row.
    Bar,
    /// Points joined in ascending x order.
    Line,
    /// Markers sized by a size column.
    Bubble,
    /// Scatter with every style option configurable.
    CustomScatter,
}

impl ChartKind {
    /// All kinds in menu order.
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Scatter,
        ChartKind::Surface,
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Bubble,
        ChartKind::CustomScatter,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ChartKind::Scatter => "3D Scatter Plot",
            ChartKind::Surface => "3D Surface Plot",
            ChartKind::Bar => "3D Bar Chart",
            ChartKind::Line => "3D Line Graph",
            ChartKind::Bubble => "Bubble Chart",
            ChartKind::CustomScatter => "Custom 3D Scatter Plot",
        }
    }

    /// Short identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter",
            ChartKind::Surface => "surface",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Bubble => "bubble",
            ChartKind::CustomScatter => "custom-scatter",
        }
    }

    /// Whether this kind takes a size column.
    #[must_use]
    pub const fn uses_size(self) -> bool {
        matches!(self, ChartKind::Bubble | ChartKind::CustomScatter)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ChartKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s) || k.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownChartKind(s.to_string()))
    }
}

/// Everything needed to build one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart kind.
    pub kind: ChartKind,
    /// X column.
    pub x: String,
    /// Y column.
    pub y: String,
    /// Z column.
    pub z: String,
    /// Optional color column (numeric or categorical).
    #[serde(default)]
    pub color: Option<String>,
    /// Optional size column.
    #[serde(default)]
    pub size: Option<String>,
    /// Style options (used by custom scatter).
    #[serde(default)]
    pub style: StyleConfig,
}

impl ChartRequest {
    /// Request with the three axis columns and default style.
    #[must_use]
    pub fn new(kind: ChartKind, x: &str, y: &str, z: &str) -> Self {
        Self {
            kind,
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
            color: None,
            size: None,
            style: StyleConfig::default(),
        }
    }

    /// Set the color column.
    #[must_use]
    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }

    /// Set the size column.
    #[must_use]
    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

// ============================================================================
// Output
// ============================================================================

/// Non-fatal problems found while building a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartWarning {
    /// unique(x) * unique(y) differs from the row count.
    IncompleteGrid {
        /// Distinct x values.
        unique_x: usize,
        /// Distinct y values.
        unique_y: usize,
        /// Total rows.
        rows: usize,
        /// Grid cells that received a row.
        filled: usize,
    },
}

impl fmt::Display for ChartWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartWarning::IncompleteGrid { unique_x, unique_y, rows, filled } => {
                write!(
                    f,
                    "The selected data may not be suitable for a surface plot. Surface plots \
                     require grid-like data. Your data has {unique_x} unique X values, \
                     {unique_y} unique Y values, but {rows} total points."
                )?;
                match unique_x.saturating_mul(*unique_y).saturating_sub(*filled) {
                    0 => Ok(()),
                    1 => f.write_str(" 1 grid cell has no value."),
                    empty => write!(f, " {empty} grid cells have no value."),
                }
            }
        }
    }
}

/// A built figure plus any warnings the caller should surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOutput {
    /// The figure.
    pub figure: Figure,
    /// Non-fatal warnings.
    pub warnings: Vec<ChartWarning>,
}

// ============================================================================
// Builder
// ============================================================================

/// Resolved inputs shared by the per-kind builders.
pub(crate) struct ChartContext<'a> {
    pub(crate) table: &'a Table,
    pub(crate) request: &'a ChartRequest,
    pub(crate) theme: &'a Theme,
    pub(crate) x: &'a [f64],
    pub(crate) y: &'a [f64],
    pub(crate) z: &'a [f64],
}

impl<'a> ChartContext<'a> {
    /// Point trace over `rows`, in the given order, with an empty marker.
    pub(crate) fn points(&self, rows: Vec<usize>, name: Option<String>) -> PointTrace {
        PointTrace {
            name,
            mode: None,
            x: gather(self.x, &rows),
            y: gather(self.y, &rows),
            z: gather(self.z, &rows),
            rows,
            marker: Marker::default(),
            line: None,
        }
    }

    /// Numeric values of the size column, if the request names one.
    pub(crate) fn size_values(&self) -> Result<Option<(&'a str, &'a [f64])>> {
        match self.request.size.as_deref() {
            Some(name) => Ok(Some((name, self.table.numeric(name)?))),
            None => Ok(None),
        }
    }
}

/// Values of `column` at `rows`, in order.
pub(crate) fn gather(column: &[f64], rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&r| column[r]).collect()
}

/// Build a figure for `request` over `table`.
///
/// # Errors
///
/// Fails without substituting defaults when a referenced column is missing,
/// an axis or size column is not numeric, a style option is out of range, a
/// bubble chart has no usable size column, or a surface grid cannot be filled.
pub fn build_chart(table: &Table, request: &ChartRequest) -> Result<ChartOutput> {
    build_chart_with_theme(table, request, &Theme::dark())
}

/// Like [`build_chart`] with an explicit theme.
///
/// # Errors
///
/// See [`build_chart`].
pub fn build_chart_with_theme(table: &Table, request: &ChartRequest, theme: &Theme) -> Result<ChartOutput> {
    request.style.validate()?;

    let ctx = ChartContext {
        table,
        request,
        theme,
        x: table.numeric(&request.x)?,
        y: table.numeric(&request.y)?,
        z: table.numeric(&request.z)?,
    };

    if let Some(color) = request.color.as_deref() {
        table.column(color)?;
    }
    ctx.size_values()?;

    let mut warnings = Vec::new();
    let data: Vec<Trace> = match request.kind {
        ChartKind::Scatter => scatter::traces(&ctx)?,
        ChartKind::Surface => surface::traces(&ctx, &mut warnings)?,
        ChartKind::Bar => bar::traces(&ctx)?,
        ChartKind::Line => line::traces(&ctx)?,
        ChartKind::Bubble => bubble::traces(&ctx)?,
        ChartKind::CustomScatter => custom::traces(&ctx)?,
    };

    let camera = (request.kind == ChartKind::CustomScatter).then(|| request.style.camera_eye());
    let layout = theme.layout(&request.x, &request.y, &request.z, camera);

    for w in &warnings {
        warn!(kind = request.kind.id(), "{w}");
    }
    debug!(
        kind = request.kind.id(),
        rows = table.row_count(),
        traces = data.len(),
        warnings = warnings.len(),
        "built chart"
    );

    Ok(ChartOutput { figure: Figure { data, layout }, warnings })
}

/// Load CSV text, build the chart described by a JSON [`ChartRequest`], and
/// return the output as JSON.
///
/// # Errors
///
/// Returns CSV, JSON, or chart-building errors.
pub fn build_chart_json(csv_text: &str, request_json: &str) -> Result<String> {
    let table = Table::from_csv_str(csv_text)?;
    let request: ChartRequest = serde_json::from_str(request_json)?;
    let output = build_chart(&table, &request)?;
    Ok(serde_json::to_string(&output)?)
}
