//! Bubble chart.
//!
//! The size reference comes from the maximum of the whole size column, not of
//! each group, so bubbles stay comparable across categorical traces.

use crate::error::{Error, Result};
use crate::figure::{Marker, Mode, Trace};
use crate::scale::{extent, Colorscale, SizeScale};

use super::{gather, group_rows, ChartContext, Grouping};

const OPACITY: f32 = 0.7;

/// Size scale for a bubble size column.
///
/// # Errors
///
/// Fails on negative values or when no value is positive.
pub(crate) fn bubble_scale(column: &str, values: &[f64]) -> Result<SizeScale> {
    let unsupported = |reason| Error::UnsupportedSize { column: column.to_string(), reason };

    let (lo, hi) = extent(values).ok_or_else(|| unsupported("no finite values"))?;
    if lo < 0.0 {
        return Err(unsupported("negative values"));
    }
    if hi <= 0.0 {
        return Err(unsupported("no positive values"));
    }
    SizeScale::bubble(hi)
}

pub(super) fn traces(ctx: &ChartContext<'_>) -> Result<Vec<Trace>> {
    let (size_name, sizes) = ctx.size_values()?.ok_or(Error::SizeColumnRequired("Bubble chart"))?;
    let scale = bubble_scale(size_name, sizes)?;
    let Grouping { mode, groups } = group_rows(ctx.table, ctx.request.color.as_deref())?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let base = Marker::default()
                .scaled_sizes(gather(sizes, &group.rows), scale)
                .opacity(OPACITY)
                .outline(ctx.theme.outline());
            let fallback = (ctx.request.z.as_str(), ctx.z);
            let marker = mode.apply(base, &group.rows, fallback, Colorscale::Plasma);
            let mut trace = ctx.points(group.rows, group.label);
            trace.mode = Some(Mode::Markers);
            trace.marker = marker;
            Trace::Scatter3d(trace)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_chart, ChartKind, ChartRequest};
    use crate::table::Table;

    fn table(sizes: &[f64]) -> Table {
        Table::new()
            .with_numeric("x", &[1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("y", &[1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("z", &[1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("s", sizes)
            .unwrap()
            .with_categorical("g", &["a", "b", "a"])
            .unwrap()
    }

    fn pixel_sizes(sizes: &[f64], color: Option<&str>) -> Vec<Vec<f32>> {
        let mut req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("s");
        if let Some(c) = color {
            req = req.color(c);
        }
        let out = build_chart(&table(sizes), &req).unwrap();
        out.figure.point_traces().map(|t| t.marker.pixel_sizes(t.len()).unwrap()).collect()
    }

    #[test]
    fn test_bubble_sizeref() {
        let out = build_chart(
            &table(&[10.0, 20.0, 40.0]),
            &ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("s"),
        )
        .unwrap();
        let m = &out.figure.data[0].as_points().unwrap().marker;
        assert!((m.sizeref.unwrap() - 2.0 * 40.0 / 1600.0).abs() < 1e-12);
        assert_eq!(m.sizemin, Some(4.0));
        assert_eq!(m.opacity, Some(0.7));
    }

    #[test]
    fn test_bubble_doubling_sizes_keeps_pixels() {
        assert_eq!(pixel_sizes(&[10.0, 20.0, 40.0], None), pixel_sizes(&[20.0, 40.0, 80.0], None));
    }

    #[test]
    fn test_bubble_reference_is_global_across_groups() {
        let grouped = pixel_sizes(&[10.0, 20.0, 40.0], Some("g"));
        assert_eq!(grouped.len(), 2);
        // Group "b" holds only the 20, which must not be rescaled to the max.
        assert!((grouped[1][0] - 400.0).abs() < 1e-2);
        assert!((grouped[0][1] - 800.0).abs() < 1e-2);
    }

    #[test]
    fn test_bubble_requires_size() {
        let req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z");
        let err = build_chart(&table(&[1.0, 2.0, 3.0]), &req).unwrap_err();
        assert!(matches!(err, Error::SizeColumnRequired(_)));
    }

    #[test]
    fn test_bubble_rejects_negative() {
        let req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("s");
        let err = build_chart(&table(&[1.0, -2.0, 3.0]), &req).unwrap_err();
        assert!(matches!(err, Error::UnsupportedSize { reason: "negative values", .. }));
    }

    #[test]
    fn test_bubble_rejects_all_zero() {
        assert!(bubble_scale("s", &[0.0, 0.0]).is_err());
        assert!(bubble_scale("s", &[f64::NAN]).is_err());
    }

    #[test]
    fn test_bubble_rejects_categorical_size() {
        let req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("g");
        assert!(matches!(build_chart(&table(&[1.0, 2.0, 3.0]), &req), Err(Error::NotNumeric(_))));
    }
}
