//! 3D bar chart.

use crate::error::Result;
use crate::figure::{Marker, Trace};
use crate::scale::Colorscale;

use super::{group_rows, ChartContext, ColorMode, Grouping};

/// One bar per row. Categorical groups carry only their label; otherwise bars
/// are colored by the color column or z.
pub(super) fn traces(ctx: &ChartContext<'_>) -> Result<Vec<Trace>> {
    let Grouping { mode, groups } = group_rows(ctx.table, ctx.request.color.as_deref())?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let marker = match mode {
                ColorMode::Categorical { .. } => Marker::default(),
                _ => mode.apply(
                    Marker::default().outline(ctx.theme.outline()),
                    &group.rows,
                    (ctx.request.z.as_str(), ctx.z),
                    Colorscale::Viridis,
                ),
            };
            let mut trace = ctx.points(group.rows, group.label);
            trace.marker = marker;
            Trace::Bar3d(trace)
        })
        .collect())
}
