//! Style options for customizable charts.
//!
//! Every option has a default and a closed range. Out-of-range values are
//! rejected by [`StyleConfig::validate`], never clamped.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::figure::{Camera, Eye};
use crate::scale::Colorscale;

/// Accepted marker base size, in pixels.
pub const MARKER_SIZE_RANGE: (u32, u32) = (2, 20);

/// Accepted marker opacity.
pub const OPACITY_RANGE: (f32, f32) = (0.1, 1.0);

/// Accepted camera rotation input, per axis.
pub const CAMERA_RANGE: (f32, f32) = (-180.0, 180.0);

/// Divisor turning a rotation input into an eye offset.
///
/// The result is not a rotation in degrees or radians; the factor is kept for
/// output compatibility with existing chart configurations.
pub const CAMERA_EYE_DIVISOR: f32 = 100.0;

/// Styling record for customizable charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Continuous colorscale.
    pub colorscale: Colorscale,
    /// Marker base size in pixels.
    pub marker_size: u32,
    /// Marker opacity.
    pub opacity: f32,
    /// Camera rotation input around x.
    pub camera_x: f32,
    /// Camera rotation input around y.
    pub camera_y: f32,
    /// Camera rotation input around z.
    pub camera_z: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colorscale: Colorscale::Plasma,
            marker_size: 8,
            opacity: 0.85,
            camera_x: 0.0,
            camera_y: 0.0,
            camera_z: 0.0,
        }
    }
}

fn check(option: &'static str, value: f32, (min, max): (f32, f32)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::StyleOutOfRange { option, value, min, max })
    }
}

impl StyleConfig {
    /// Creates a style with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the colorscale.
    #[must_use]
    pub fn colorscale(mut self, colorscale: Colorscale) -> Self {
        self.colorscale = colorscale;
        self
    }

    /// Set the marker base size.
    #[must_use]
    pub fn marker_size(mut self, size: u32) -> Self {
        self.marker_size = size;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the three camera rotation inputs.
    #[must_use]
    pub fn camera(mut self, x: f32, y: f32, z: f32) -> Self {
        self.camera_x = x;
        self.camera_y = y;
        self.camera_z = z;
        self
    }

    /// Check every option against its range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StyleOutOfRange`] for the first offending option.
    pub fn validate(&self) -> Result<()> {
        let (size_min, size_max) = MARKER_SIZE_RANGE;
        check("marker_size", self.marker_size as f32, (size_min as f32, size_max as f32))?;
        check("opacity", self.opacity, OPACITY_RANGE)?;
        check("camera_x", self.camera_x, CAMERA_RANGE)?;
        check("camera_y", self.camera_y, CAMERA_RANGE)?;
        check("camera_z", self.camera_z, CAMERA_RANGE)?;
        Ok(())
    }

    /// Camera whose eye is each rotation input divided by 100.
    #[must_use]
    pub fn camera_eye(&self) -> Camera {
        Camera {
            eye: Eye {
                x: self.camera_x / CAMERA_EYE_DIVISOR,
                y: self.camera_y / CAMERA_EYE_DIVISOR,
                z: self.camera_z / CAMERA_EYE_DIVISOR,
            },
        }
    }
}
