//! 3D scatter plot.

use crate::error::Result;
use crate::figure::{Marker, Mode, Trace};
use crate::scale::Colorscale;

use super::{group_rows, ChartContext, Grouping};

const MARKER_SIZE: f32 = 8.0;
const OPACITY: f32 = 0.85;

/// One marker per row, colored by z unless a color column is given.
pub(super) fn traces(ctx: &ChartContext<'_>) -> Result<Vec<Trace>> {
    let Grouping { mode, groups } = group_rows(ctx.table, ctx.request.color.as_deref())?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let base = Marker::sized(MARKER_SIZE).opacity(OPACITY).outline(ctx.theme.outline());
            let fallback = (ctx.request.z.as_str(), ctx.z);
            let marker = mode.apply(base, &group.rows, fallback, Colorscale::Plasma);
            let mut trace = ctx.points(group.rows, group.label);
            trace.mode = Some(Mode::Markers);
            trace.marker = marker;
            Trace::Scatter3d(trace)
        })
        .collect())
}
