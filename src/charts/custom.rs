//! Customizable 3D scatter plot.
//!
//! Colorscale, base marker size and opacity come from the request style. A
//! size column, when given, supplies raw per-point diameters. The camera is
//! placed by [`super::build_chart`].

use crate::error::Result;
use crate::figure::{Marker, Mode, Trace};

use super::{gather, group_rows, ChartContext, Grouping};

pub(super) fn traces(ctx: &ChartContext<'_>) -> Result<Vec<Trace>> {
    let style = &ctx.request.style;
    let sizes = ctx.size_values()?;
    let Grouping { mode, groups } = group_rows(ctx.table, ctx.request.color.as_deref())?;

    Ok(groups
        .into_iter()
        .map(|group| {
            let base = match sizes {
                Some((_, values)) => Marker::default().raw_sizes(gather(values, &group.rows)),
                None => Marker::sized(style.marker_size as f32),
            }
            .opacity(style.opacity)
            .outline(ctx.theme.outline());

            let fallback = (ctx.request.z.as_str(), ctx.z);
            let marker = mode.apply(base, &group.rows, fallback, style.colorscale);
            let mut trace = ctx.points(group.rows, group.label);
            trace.mode = Some(Mode::Markers);
            trace.marker = marker;
            Trace::Scatter3d(trace)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::charts::{build_chart, ChartKind, ChartRequest};
    use crate::figure::MarkerSize;
    use crate::scale::Colorscale;
    use crate::style::StyleConfig;
    use crate::table::Table;

    fn table() -> Table {
        Table::new()
            .with_numeric("x", &[1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("y", &[1.0, 2.0, 3.0])
            .unwrap()
            .with_numeric("z", &[5.0, 6.0, 7.0])
            .unwrap()
            .with_numeric("s", &[3.0, 9.0, 12.0])
            .unwrap()
            .with_categorical("g", &["u", "u", "v"])
            .unwrap()
    }

    fn style() -> StyleConfig {
        StyleConfig::new().colorscale(Colorscale::Turbo).marker_size(14).opacity(0.4)
    }

    #[test]
    fn test_custom_style_applied() {
        let req = ChartRequest::new(ChartKind::CustomScatter, "x", "y", "z").style(style());
        let out = build_chart(&table(), &req).unwrap();
        let m = &out.figure.data[0].as_points().unwrap().marker;
        assert_eq!(m.size, Some(MarkerSize::Fixed(14.0)));
        assert_eq!(m.opacity, Some(0.4));
        assert_eq!(m.colorscale, Some(Colorscale::Turbo));
        assert_eq!(m.colorbar.as_ref().unwrap().title.text, "z");
    }

    #[test]
    fn test_custom_raw_sizes_per_group() {
        let req = ChartRequest::new(ChartKind::CustomScatter, "x", "y", "z")
            .size("s")
            .color("g")
            .style(style());
        let out = build_chart(&table(), &req).unwrap();
        let traces: Vec<_> = out.figure.point_traces().collect();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].marker.size, Some(MarkerSize::PerPoint(vec![3.0, 9.0])));
        assert!(traces[0].marker.sizeref.is_none());
        assert_eq!(traces[1].marker.size, Some(MarkerSize::PerPoint(vec![12.0])));
        assert!(traces[1].marker.colorscale.is_none());
    }

    #[test]
    fn test_custom_camera_in_layout() {
        let req = ChartRequest::new(ChartKind::CustomScatter, "x", "y", "z")
            .style(StyleConfig::new().camera(-180.0, 25.0, 180.0));
        let json = serde_json::to_value(build_chart(&table(), &req).unwrap().figure).unwrap();
        let eye = &json["layout"]["scene"]["camera"]["eye"];
        assert!((eye["x"].as_f64().unwrap() + 1.8).abs() < 1e-5);
        assert!((eye["y"].as_f64().unwrap() - 0.25).abs() < 1e-5);
        assert!((eye["z"].as_f64().unwrap() - 1.8).abs() < 1e-5);
    }
}
