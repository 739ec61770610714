//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (color, marker size).
//! Continuous colorscales are addressed by name in the emitted figure, but
//! every palette also carries its RGB stops so callers without a plotly-style
//! renderer can resolve colors themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Min and max of the finite values in `data`, or `None` if there are none.
#[must_use]
pub fn extent(data: &[f64]) -> Option<(f64, f64)> {
    data.iter().copied().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// True when `lo..=hi` is too narrow to tell values apart, relative to the
/// magnitude of its bounds.
fn is_degenerate(lo: f64, hi: f64) -> bool {
    let span = hi - lo;
    span <= 0.0 || span <= f64::EPSILON * lo.abs().max(hi.abs())
}

// ============================================================================
// Named colorscales
// ============================================================================

const PLASMA: [Rgba; 5] = [
    Rgba::rgb(13, 8, 135),
    Rgba::rgb(126, 3, 168),
    Rgba::rgb(204, 71, 120),
    Rgba::rgb(248, 149, 64),
    Rgba::rgb(240, 249, 33),
];

const VIRIDIS: [Rgba; 5] = [
    Rgba::rgb(68, 1, 84),
    Rgba::rgb(59, 82, 139),
    Rgba::rgb(33, 145, 140),
    Rgba::rgb(94, 201, 98),
    Rgba::rgb(253, 231, 37),
];

const INFERNO: [Rgba; 6] = [
    Rgba::rgb(0, 0, 4),
    Rgba::rgb(66, 10, 104),
    Rgba::rgb(147, 38, 103),
    Rgba::rgb(221, 81, 58),
    Rgba::rgb(252, 165, 10),
    Rgba::rgb(252, 255, 164),
];

const MAGMA: [Rgba; 6] = [
    Rgba::rgb(0, 0, 4),
    Rgba::rgb(59, 15, 112),
    Rgba::rgb(140, 41, 129),
    Rgba::rgb(222, 73, 104),
    Rgba::rgb(254, 159, 109),
    Rgba::rgb(252, 253, 191),
];

const CIVIDIS: [Rgba; 6] = [
    Rgba::rgb(0, 34, 78),
    Rgba::rgb(53, 69, 108),
    Rgba::rgb(102, 105, 112),
    Rgba::rgb(148, 142, 119),
    Rgba::rgb(200, 184, 102),
    Rgba::rgb(254, 232, 56),
];

const BLUERED: [Rgba; 2] = [
    Rgba::rgb(0, 0, 255),
    Rgba::rgb(255, 0, 0),
];

const RD_BU: [Rgba; 6] = [
    Rgba::rgb(5, 10, 172),
    Rgba::rgb(106, 137, 247),
    Rgba::rgb(190, 190, 190),
    Rgba::rgb(220, 170, 132),
    Rgba::rgb(230, 145, 90),
    Rgba::rgb(178, 10, 28),
];

const JET: [Rgba; 6] = [
    Rgba::rgb(0, 0, 131),
    Rgba::rgb(0, 60, 170),
    Rgba::rgb(5, 255, 255),
    Rgba::rgb(255, 255, 0),
    Rgba::rgb(250, 0, 0),
    Rgba::rgb(128, 0, 0),
];

const RAINBOW: [Rgba; 9] = [
    Rgba::rgb(150, 0, 90),
    Rgba::rgb(0, 0, 200),
    Rgba::rgb(0, 25, 255),
    Rgba::rgb(0, 152, 255),
    Rgba::rgb(44, 255, 150),
    Rgba::rgb(151, 255, 0),
    Rgba::rgb(255, 234, 0),
    Rgba::rgb(255, 111, 0),
    Rgba::rgb(255, 0, 0),
];

const TURBO: [Rgba; 15] = [
    Rgba::rgb(48, 18, 59),
    Rgba::rgb(65, 69, 171),
    Rgba::rgb(70, 117, 237),
    Rgba::rgb(57, 162, 252),
    Rgba::rgb(27, 207, 212),
    Rgba::rgb(36, 236, 166),
    Rgba::rgb(97, 252, 108),
    Rgba::rgb(164, 252, 59),
    Rgba::rgb(209, 232, 52),
    Rgba::rgb(243, 198, 58),
    Rgba::rgb(254, 155, 45),
    Rgba::rgb(243, 99, 21),
    Rgba::rgb(217, 56, 6),
    Rgba::rgb(177, 25, 1),
    Rgba::rgb(122, 4, 2),
];

/// The continuous colorscales offered for numeric color encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Colorscale {
    /// Plasma (default).
    #[default]
    Plasma,
    /// Viridis.
    Viridis,
    /// Inferno.
    Inferno,
    /// Magma.
    Magma,
    /// Cividis.
    Cividis,
    /// Blue to red.
    Bluered,
    /// Diverging red-blue.
    RdBu,
    /// Jet.
    Jet,
    /// Rainbow.
    Rainbow,
    /// Turbo.
    Turbo,
}

impl Colorscale {
    /// All palettes in menu order.
    pub const ALL: [Colorscale; 10] = [
        Colorscale::Plasma,
        Colorscale::Viridis,
        Colorscale::Inferno,
        Colorscale::Magma,
        Colorscale::Cividis,
        Colorscale::Bluered,
        Colorscale::RdBu,
        Colorscale::Jet,
        Colorscale::Rainbow,
        Colorscale::Turbo,
    ];

    /// Palette name as understood by plotly-style renderers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Colorscale::Plasma => "Plasma",
            Colorscale::Viridis => "Viridis",
            Colorscale::Inferno => "Inferno",
            Colorscale::Magma => "Magma",
            Colorscale::Cividis => "Cividis",
            Colorscale::Bluered => "Bluered",
            Colorscale::RdBu => "RdBu",
            Colorscale::Jet => "Jet",
            Colorscale::Rainbow => "Rainbow",
            Colorscale::Turbo => "Turbo",
        }
    }

    /// Evenly spaced RGB stops, low to high.
    #[must_use]
    pub fn stops(self) -> &'static [Rgba] {
        match self {
            Colorscale::Plasma => &PLASMA,
            Colorscale::Viridis => &VIRIDIS,
            Colorscale::Inferno => &INFERNO,
            Colorscale::Magma => &MAGMA,
            Colorscale::Cividis => &CIVIDIS,
            Colorscale::Bluered => &BLUERED,
            Colorscale::RdBu => &RD_BU,
            Colorscale::Jet => &JET,
            Colorscale::Rainbow => &RAINBOW,
            Colorscale::Turbo => &TURBO,
        }
    }

    /// Interpolating scale over `domain` using this palette's stops.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain bounds are not finite.
    pub fn to_color_scale(self, domain: (f64, f64)) -> Result<ColorScale> {
        ColorScale::new(self.stops().to_vec(), domain)
    }
}

impl fmt::Display for Colorscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colorscale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Colorscale::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColorscale(s.to_string()))
    }
}

impl TryFrom<String> for Colorscale {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl Serialize for Colorscale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// ============================================================================
// Interpolating color scale
// ============================================================================

/// Color scale for mapping values to colors.
///
/// A degenerate domain (a constant column) maps every value to the palette
/// midpoint.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f64,
    domain_max: f64,
}

impl ColorScale {
    /// Create a new color scale.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or the domain is not a finite,
    /// ordered pair.
    pub fn new(colors: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        let (lo, hi) = domain;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::ScaleDomain(format!("Invalid domain [{lo}, {hi}]")));
        }

        Ok(Self { colors, domain_min: lo, domain_max: hi })
    }

    fn position(&self, value: f64) -> f32 {
        if is_degenerate(self.domain_min, self.domain_max) {
            return 0.5;
        }
        ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0) as f32
    }
}

impl Scale<f64, Rgba> for ColorScale {
    fn scale(&self, value: f64) -> Rgba {
        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let t = self.position(value);
        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

// ============================================================================
// Bubble size scale
// ============================================================================

/// Pixel diameter the largest size value maps to.
pub const BUBBLE_REFERENCE_PX: f32 = 40.0;

/// Smallest rendered bubble diameter in pixels.
pub const BUBBLE_MIN_PX: f32 = 4.0;

/// Maps raw size-column values to marker diameters.
///
/// A value renders at `max(value / sizeref, sizemin)` pixels. For bubble
/// charts `sizeref = 2 * max / 40^2`, so the mapping only depends on each
/// value relative to the column maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    sizeref: f64,
    sizemin: f32,
}

impl SizeScale {
    /// Scale with an explicit reference and floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `sizeref` is not a positive finite number.
    pub fn new(sizeref: f64, sizemin: f32) -> Result<Self> {
        if !(sizeref.is_finite() && sizeref > 0.0) {
            return Err(Error::ScaleDomain(format!("Size reference must be positive, got {sizeref}")));
        }
        Ok(Self { sizeref, sizemin: sizemin.max(0.0) })
    }

    /// Bubble scale for a size column whose largest value is `max`.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is not a positive finite number.
    pub fn bubble(max: f64) -> Result<Self> {
        if !(max.is_finite() && max > 0.0) {
            return Err(Error::ScaleDomain(format!("Size reference requires a positive maximum, got {max}")));
        }
        let reference = f64::from(BUBBLE_REFERENCE_PX);
        Self::new(2.0 * max / (reference * reference), BUBBLE_MIN_PX)
    }

    /// Data value per pixel of diameter.
    #[must_use]
    pub fn sizeref(&self) -> f64 {
        self.sizeref
    }

    /// Minimum pixel diameter.
    #[must_use]
    pub fn sizemin(&self) -> f32 {
        self.sizemin
    }
}

impl Scale<f64, f32> for SizeScale {
    fn scale(&self, value: f64) -> f32 {
        // f32::max discards NaN, so missing sizes fall back to the floor.
        ((value / self.sizeref) as f32).max(self.sizemin)
    }

    fn domain(&self) -> (f64, f64) {
        let reference = f64::from(BUBBLE_REFERENCE_PX);
        (0.0, self.sizeref * reference * reference / 2.0)
    }

    fn range(&self) -> (f32, f32) {
        (self.sizemin, BUBBLE_REFERENCE_PX * BUBBLE_REFERENCE_PX / 2.0)
    }
}
