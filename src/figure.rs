//! Declarative 3D figure description.
//!
//! A [`Figure`] is an ordered list of traces plus one layout. It holds data
//! only (no callbacks) and serializes to the JSON shape plotly-style renderers
//! consume: `{"data": [...], "layout": {...}}`. Renderers draw traces in order
//! and legend-label every trace that carries a `name`.

use serde::{Deserialize, Serialize};
use trueno::Vector;

use crate::color::Rgba;
use crate::error::Result;
use crate::scale::{extent, Colorscale, Scale, SizeScale};

/// A complete plot description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Traces in draw order.
    pub data: Vec<Trace>,
    /// Shared layout.
    pub layout: Layout,
}

impl Figure {
    /// Number of traces.
    #[must_use]
    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// Point-based traces (scatter, line, bubble and bar).
    pub fn point_traces(&self) -> impl Iterator<Item = &PointTrace> + '_ {
        self.data.iter().filter_map(Trace::as_points)
    }

    /// Compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Traces
// ============================================================================

/// One renderable series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    /// Points and/or connected lines in 3D.
    Scatter3d(PointTrace),
    /// One bar per row.
    Bar3d(PointTrace),
    /// Gridded surface.
    Surface(SurfaceTrace),
}

impl Trace {
    /// Legend label, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Scatter3d(t) | Trace::Bar3d(t) => t.name.as_deref(),
            Trace::Surface(_) => None,
        }
    }

    /// The point payload for scatter-like and bar traces.
    #[must_use]
    pub fn as_points(&self) -> Option<&PointTrace> {
        match self {
            Trace::Scatter3d(t) | Trace::Bar3d(t) => Some(t),
            Trace::Surface(_) => None,
        }
    }

    /// The surface payload.
    #[must_use]
    pub fn as_surface(&self) -> Option<&SurfaceTrace> {
        match self {
            Trace::Surface(s) => Some(s),
            _ => None,
        }
    }
}

/// Drawing mode of a scatter trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Markers only.
    #[serde(rename = "markers")]
    Markers,
    /// Markers joined by a line.
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// Coordinates and styling of a point-based trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointTrace {
    /// Legend label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Drawing mode (absent for bars).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Z coordinates.
    pub z: Vec<f64>,
    /// Source row index of each point.
    #[serde(rename = "customdata")]
    pub rows: Vec<usize>,
    /// Marker styling.
    pub marker: Marker,
    /// Line styling (line charts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

impl PointTrace {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the trace has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A z grid over distinct x and y values.
///
/// `z[i][j]` is the height at `(x[j], y[i])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceTrace {
    /// Distinct x values, ascending.
    pub x: Vec<f64>,
    /// Distinct y values, ascending.
    pub y: Vec<f64>,
    /// Heights, one row per y value; cells without data are NaN.
    pub z: Vec<Vec<f64>>,
    /// Continuous colorscale applied to z.
    pub colorscale: Colorscale,
}

// ============================================================================
// Marker and line styling
// ============================================================================

/// Marker size: one size for all points or one per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerSize {
    /// Same size for every point.
    Fixed(f32),
    /// Raw per-point values, interpreted through `sizeref`/`sizemin`.
    PerPoint(Vec<f64>),
}

/// Color: a fixed color or numeric values mapped through a colorscale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Same color for every point.
    Fixed(Rgba),
    /// Per-point values for a continuous colorscale.
    Values(Vec<f64>),
}

/// Text wrapper used for axis and colorbar titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Title text.
    pub text: String,
}

impl Title {
    /// Create a title.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Color legend of a continuous encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorBar {
    /// Legend title (the encoded column's name).
    pub title: Title,
}

/// Thin border drawn around markers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    /// Border width in pixels.
    pub width: f32,
    /// Border color.
    pub color: Rgba,
}

/// Marker styling.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    /// Marker size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<MarkerSize>,
    /// Data value per pixel of diameter for per-point sizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
    /// Minimum diameter in pixels for per-point sizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemin: Option<f32>,
    /// Marker color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    /// Colorscale for value colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Colorscale>,
    /// Lower bound of the color domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmin: Option<f64>,
    /// Upper bound of the color domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmax: Option<f64>,
    /// Color legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    /// Opacity in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Marker border.
    #[serde(rename = "line", skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
}

impl Marker {
    /// Fixed-size marker.
    #[must_use]
    pub fn sized(size: f32) -> Self {
        Self { size: Some(MarkerSize::Fixed(size)), ..Self::default() }
    }

    /// Set opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Set the marker border.
    #[must_use]
    pub fn outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    /// Fixed color for every point.
    #[must_use]
    pub fn fixed_color(mut self, color: Rgba) -> Self {
        self.color = Some(ColorValue::Fixed(color));
        self
    }

    /// Continuous color encoding of `values`, with the color domain set to
    /// their finite extent and a colorbar titled `title`.
    #[must_use]
    pub fn continuous(mut self, values: Vec<f64>, title: &str, colorscale: Colorscale) -> Self {
        if let Some((lo, hi)) = extent(&values) {
            self.cmin = Some(lo);
            self.cmax = Some(hi);
        }
        self.color = Some(ColorValue::Values(values));
        self.colorscale = Some(colorscale);
        self.colorbar = Some(ColorBar { title: Title::new(title) });
        self
    }

    /// Per-point sizes scaled through `scale`.
    #[must_use]
    pub fn scaled_sizes(mut self, values: Vec<f64>, scale: SizeScale) -> Self {
        self.size = Some(MarkerSize::PerPoint(values));
        self.sizeref = Some(scale.sizeref());
        self.sizemin = Some(scale.sizemin());
        self
    }

    /// Raw per-point sizes, used as pixel diameters directly.
    #[must_use]
    pub fn raw_sizes(mut self, values: Vec<f64>) -> Self {
        self.size = Some(MarkerSize::PerPoint(values));
        self
    }

    /// Rendered diameter of each of `n` points, in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker carries an invalid `sizeref`.
    pub fn pixel_sizes(&self, n: usize) -> Result<Vec<f32>> {
        let scale = SizeScale::new(self.sizeref.unwrap_or(1.0), self.sizemin.unwrap_or(0.0))?;
        let values = match &self.size {
            Some(MarkerSize::Fixed(size)) => return Ok(vec![*size; n]),
            Some(MarkerSize::PerPoint(values)) => values,
            None => return Ok(Vec::new()),
        };

        let raw: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        let raw = Vector::from_vec(raw);
        let inv_ref = Vector::from_vec(vec![(1.0 / scale.sizeref()) as f32; values.len()]);
        let px = match raw.mul(&inv_ref) {
            Ok(px) => px.as_slice().to_vec(),
            Err(_) => return Ok(values.iter().map(|&v| scale.scale(v)).collect()),
        };

        // f32::max discards NaN, so missing sizes fall back to the floor.
        Ok(px.into_iter().map(|p| p.max(scale.sizemin())).collect())
    }

    /// Resolve value colors through the colorscale.
    ///
    /// Returns `None` when the marker has no value colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the color domain is not finite.
    pub fn resolved_colors(&self) -> Result<Option<Vec<Rgba>>> {
        let (Some(ColorValue::Values(values)), Some(colorscale)) = (&self.color, self.colorscale)
        else {
            return Ok(None);
        };

        let domain = match (self.cmin, self.cmax) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => extent(values).unwrap_or((0.0, 1.0)),
        };
        let scale = colorscale.to_color_scale(domain)?;
        Ok(Some(values.iter().map(|&v| scale.scale(v)).collect()))
    }
}

/// Connecting-line styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    /// Line width in pixels.
    pub width: f32,
    /// Line color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    /// Colorscale for value colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<Colorscale>,
}

// ============================================================================
// Layout
// ============================================================================

/// Figure-wide layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// 3D scene.
    pub scene: Scene,
    /// Page background.
    pub paper_bgcolor: Rgba,
    /// Plot area background.
    pub plot_bgcolor: Rgba,
    /// Global font.
    pub font: Font,
}

/// Font settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    /// Text color.
    pub color: Rgba,
}

/// 3D scene: three axes, background and optional camera.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// X axis.
    pub xaxis: Axis,
    /// Y axis.
    pub yaxis: Axis,
    /// Z axis.
    pub zaxis: Axis,
    /// Scene background.
    pub bgcolor: Rgba,
    /// Camera placement; renderer default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
}

/// One scene axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title (the column name).
    pub title: Title,
    /// Tick and label color.
    pub color: Rgba,
    /// Grid line color.
    pub gridcolor: Rgba,
    /// Zero line color.
    pub zerolinecolor: Rgba,
}

/// Camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    /// Eye position relative to the scene center.
    pub eye: Eye,
}

/// A 3D position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Eye {
    /// X offset.
    pub x: f32,
    /// Y offset.
    pub y: f32,
    /// Z offset.
    pub z: f32,
}
