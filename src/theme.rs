//! Theme shared by every chart kind.
//!
//! Controls the non-data appearance of a figure: backgrounds, axis and grid
//! colors, font color and the thin marker border.

use crate::color::Rgba;
use crate::figure::{Axis, Camera, Font, Layout, Outline, Scene, Title};

/// Theme specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Page, plot and scene background.
    pub background: Rgba,
    /// Axis tick/label color; also the accent for single-series lines.
    pub axis_color: Rgba,
    /// Grid line color.
    pub grid_color: Rgba,
    /// Zero line color.
    pub zeroline_color: Rgba,
    /// Text color.
    pub text_color: Rgba,
    /// Marker border color.
    pub outline_color: Rgba,
    /// Marker border width.
    pub outline_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(0x18, 0x1c, 0x20),
            axis_color: Rgba::rgb(0x00, 0xad, 0xb5),
            grid_color: Rgba::rgb(0x39, 0x3e, 0x46),
            zeroline_color: Rgba::rgb(0x39, 0x3e, 0x46),
            text_color: Rgba::rgb(0xee, 0xee, 0xee),
            outline_color: Rgba::WHITE,
            outline_width: 0.5,
        }
    }

    /// Set background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set grid color.
    #[must_use]
    pub fn grid_color(mut self, color: Rgba) -> Self {
        self.grid_color = color;
        self
    }

    /// Accent color used for uncolored line series.
    #[must_use]
    pub fn accent(&self) -> Rgba {
        self.axis_color
    }

    /// Marker border.
    #[must_use]
    pub fn outline(&self) -> Outline {
        Outline { width: self.outline_width, color: self.outline_color }
    }

    /// Axis titled `title`.
    #[must_use]
    pub fn axis(&self, title: &str) -> Axis {
        Axis {
            title: Title::new(title),
            color: self.axis_color,
            gridcolor: self.grid_color,
            zerolinecolor: self.zeroline_color,
        }
    }

    /// Layout with the three axis titles and an optional camera.
    #[must_use]
    pub fn layout(&self, x: &str, y: &str, z: &str, camera: Option<Camera>) -> Layout {
        Layout {
            scene: Scene {
                xaxis: self.axis(x),
                yaxis: self.axis(y),
                zaxis: self.axis(z),
                bgcolor: self.background,
                camera,
            },
            paper_bgcolor: self.background,
            plot_bgcolor: self.background,
            font: Font { color: self.text_color },
        }
    }
}
