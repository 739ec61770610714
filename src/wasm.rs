//! WebAssembly bindings for eda3d.
//!
//! Every function takes CSV text and returns a string, so the browser side
//! only needs a plotly-style renderer for the figure JSON.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { build_chart_json, run_eda } from 'eda3d';
//!
//! await init();
//!
//! const out = JSON.parse(build_chart_json(csvText, JSON.stringify({
//!     kind: 'scatter', x: 'len', y: 'width', z: 'depth', color: 'species',
//! })));
//! Plotly.newPlot('chart', out.figure.data, out.figure.layout);
//! out.warnings.forEach(w => console.warn(w));
//!
//! console.log(run_eda(csvText, 'describe column len'));
//! ```

use wasm_bindgen::prelude::*;

use crate::charts;
use crate::eda;
use crate::scale::Colorscale;
use crate::selection::{color_options, AxisSelection};
use crate::table::Table;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {}

/// Build a chart from CSV text and a JSON chart request.
///
/// Returns `{"figure": {...}, "warnings": [...]}` as JSON.
///
/// # Errors
///
/// Returns a JS error string for CSV, request or chart errors.
#[wasm_bindgen]
pub fn build_chart_json(csv_text: &str, request_json: &str) -> Result<String, JsValue> {
    charts::build_chart_json(csv_text, request_json).map_err(js_err)
}

/// Run an EDA command over CSV text and return the text report.
///
/// # Errors
///
/// Returns a JS error string for CSV or command errors.
#[wasm_bindgen]
pub fn run_eda(csv_text: &str, command: &str) -> Result<String, JsValue> {
    eda::run_csv(csv_text, command).map_err(js_err)
}

/// Color menu entries for the CSV columns, as a JSON array.
///
/// # Errors
///
/// Returns a JS error string if the CSV cannot be parsed.
#[wasm_bindgen]
pub fn color_menu_json(csv_text: &str) -> Result<String, JsValue> {
    let table = Table::from_csv_str(csv_text).map_err(js_err)?;
    serde_json::to_string(&color_options(&table)).map_err(js_err)
}

/// Default `[x, y, z, size]` columns as JSON, or `null` with fewer than three
/// numeric columns.
///
/// # Errors
///
/// Returns a JS error string if the CSV cannot be parsed.
#[wasm_bindgen]
pub fn default_axes_json(csv_text: &str) -> Result<String, JsValue> {
    let table = Table::from_csv_str(csv_text).map_err(js_err)?;
    let axes = AxisSelection::defaults(&table).map(|a| (a.x, a.y, a.z, a.size));
    serde_json::to_string(&axes).map_err(js_err)
}

/// Names of the available colorscales, as a JSON array.
#[wasm_bindgen]
pub fn colorscales_json() -> String {
    let names: Vec<&str> = Colorscale::ALL.iter().map(|c| c.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
