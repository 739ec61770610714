//! # eda3d
//!
//! Exploratory data analysis and 3D chart specifications for tabular data.
//!
//! eda3d loads a CSV file into a [`table::Table`] with explicitly typed
//! columns, answers short text commands about it ([`eda`]), and builds
//! declarative 3D figures ([`charts`]) that serialize to the JSON shape
//! plotly-style renderers consume.
//!
//! ## Features
//!
//! - **Six chart kinds**: scatter, surface, bar, line, bubble and a fully
//!   styled custom scatter
//! - **Color grouping**: categorical color columns split a chart into one
//!   labelled trace per value; numeric ones map through a colorscale
//! - **Data only**: a [`figure::Figure`] holds no callbacks and can be sent
//!   straight to a browser
//! - **Double precision data**: tables, coordinates and statistics are `f64`;
//!   marker pixel sizes run on [trueno](https://crates.io/crates/trueno)
//!   vectors
//!
//! ## Quick Start
//!
//! ```rust
//! use eda3d::prelude::*;
//!
//! let table = Table::from_csv_str("x,y,z,g\n1,1,10,A\n2,1,20,B\n3,1,30,A\n")?;
//!
//! let request = ChartRequest::new(ChartKind::Scatter, "x", "y", "z").color("g");
//! let output = build_chart(&table, &request)?;
//! assert_eq!(output.figure.trace_count(), 2);
//!
//! let json = output.figure.to_json()?;
//! assert!(json.contains("scatter3d"));
//!
//! let report = eda::run(&table, "describe column z")?;
//! assert!(report.to_string().contains("mean"));
//! # Ok::<(), eda3d::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Parallel trueno kernels
//! - `cli`: The `eda3d` command-line binary
//! - `wasm`: WebAssembly bindings

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Colorscales and size scales.
pub mod scale;

/// Typed columnar tables and CSV loading.
pub mod table;

// ============================================================================
// Chart Modules
// ============================================================================

/// Declarative figure description.
pub mod figure;

/// Shared dark theme.
pub mod theme;

/// Style options for customizable charts.
pub mod style;

/// Chart construction for every chart kind.
pub mod charts;

/// Default axis selection and color menu.
pub mod selection;

// ============================================================================
// Analysis and Configuration
// ============================================================================

/// EDA text commands.
pub mod eda;

/// YAML configuration.
pub mod config;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for eda3d operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use eda3d::prelude::*;
/// ```
pub mod prelude {
    pub use crate::charts::{build_chart, ChartKind, ChartOutput, ChartRequest, ChartWarning};
    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::eda::{self, EdaCommand, EdaReport};
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Figure, Trace};
    pub use crate::scale::{Colorscale, Scale, SizeScale};
    pub use crate::selection::{color_options, AxisSelection, ColorChoice};
    pub use crate::style::StyleConfig;
    pub use crate::table::{Column, ColumnKind, Table};
    pub use crate::theme::Theme;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
