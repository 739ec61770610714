//! 3D line graph.
//!
//! Points within each group are joined in ascending x order. Rows with a NaN
//! x sort last and keep their table order.

use crate::error::Result;
use crate::figure::{ColorValue, LineStyle, Marker, Mode, Trace};

use super::{gather, group_rows, ChartContext, ColorMode, Grouping};

const MARKER_SIZE: f32 = 5.0;
const LINE_WIDTH: f32 = 4.0;

/// Stable sort of `rows` by ascending `x`, NaN last.
pub(crate) fn sort_by_x(rows: &mut [usize], x: &[f64]) {
    rows.sort_by(|&a, &b| {
        let (a, b) = (x[a], x[b]);
        a.is_nan().cmp(&b.is_nan()).then(a.total_cmp(&b))
    });
}

pub(super) fn traces(ctx: &ChartContext<'_>) -> Result<Vec<Trace>> {
    let Grouping { mode, groups } = group_rows(ctx.table, ctx.request.color.as_deref())?;
    let colorscale = ctx.request.style.colorscale;

    Ok(groups
        .into_iter()
        .map(|mut group| {
            sort_by_x(&mut group.rows, ctx.x);

            let marker = Marker::sized(MARKER_SIZE);
            let (marker, line) = match mode {
                ColorMode::Uniform => {
                    let accent = ctx.theme.accent();
                    let line = LineStyle {
                        width: LINE_WIDTH,
                        color: Some(ColorValue::Fixed(accent)),
                        colorscale: None,
                    };
                    (marker.fixed_color(accent), line)
                }
                ColorMode::Continuous { column, values } => {
                    let colors = gather(values, &group.rows);
                    let line = LineStyle {
                        width: LINE_WIDTH,
                        color: Some(ColorValue::Values(colors.clone())),
                        colorscale: Some(colorscale),
                    };
                    (marker.continuous(colors, column, colorscale), line)
                }
                ColorMode::Categorical { .. } => {
                    (marker, LineStyle { width: LINE_WIDTH, color: None, colorscale: None })
                }
            };

            let mut trace = ctx.points(group.rows, group.label);
            trace.mode = Some(Mode::LinesMarkers);
            trace.marker = marker;
            trace.line = Some(line);
            Trace::Scatter3d(trace)
        })
        .collect())
}
