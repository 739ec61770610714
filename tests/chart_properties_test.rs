//! Chart invariants checked over generated tables, plus the reference
//! scenarios for each chart kind.
//!
//! Run: cargo test --test chart_properties_test

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use eda3d::charts::{build_chart, reshape_surface, ChartKind, ChartRequest};
use eda3d::error::Error;
use eda3d::figure::{ColorValue, Figure};
use eda3d::table::{Column, Table};
use proptest::prelude::*;

const POINT_KINDS: [ChartKind; 5] = [
    ChartKind::Scatter,
    ChartKind::Bar,
    ChartKind::Line,
    ChartKind::Bubble,
    ChartKind::CustomScatter,
];

fn table(x: &[f64], sizes: &[f64], groups: &[Option<&str>]) -> Table {
    let n = x.len();
    let y: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let z: Vec<f64> = (0..n).map(|i| (i as f64).sin()).collect();

    let mut t = Table::new()
        .with_numeric("x", x)
        .unwrap()
        .with_numeric("y", &y)
        .unwrap()
        .with_numeric("z", &z)
        .unwrap()
        .with_numeric("s", sizes)
        .unwrap();
    t.add_column(Column::categorical(
        "g",
        groups.iter().map(|g| g.map(str::to_string)).collect(),
    ))
    .unwrap();
    t
}

fn all_rows(figure: &Figure) -> Vec<usize> {
    let mut rows: Vec<usize> = figure.point_traces().flat_map(|t| t.rows.iter().copied()).collect();
    rows.sort_unstable();
    rows
}

fn pixel_sizes(figure: &Figure) -> Vec<f32> {
    figure.point_traces().flat_map(|t| t.marker.pixel_sizes(t.len()).unwrap()).collect()
}

fn row_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<Option<&'static str>>)> {
    (1usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(prop_oneof![9 => -100.0f64..100.0, 1 => Just(f64::NAN)], n),
            prop::collection::vec(0.1f64..100.0, n),
            prop::collection::vec(prop::option::weighted(0.9, prop::sample::select(vec!["a", "b", "c", "d"])), n),
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every row appears in exactly one trace, for every color choice.
    #[test]
    fn prop_traces_cover_rows_disjointly((x, s, g) in row_strategy()) {
        let t = table(&x, &s, &g);
        for kind in POINT_KINDS {
            for color in [None, Some("g"), Some("z")] {
                let mut req = ChartRequest::new(kind, "x", "y", "z").size("s");
                req.color = color.map(str::to_string);
                let out = build_chart(&t, &req).unwrap();
                let expected: Vec<usize> = (0..x.len()).collect();
                prop_assert_eq!(all_rows(&out.figure), expected, "{:?} color={:?}", kind, color);
            }
        }
    }

    /// Categorical traces follow first-seen order of the color values.
    #[test]
    fn prop_groups_in_first_seen_order((x, s, g) in row_strategy()) {
        let t = table(&x, &s, &g);
        let mut expected: Vec<String> = Vec::new();
        for v in &g {
            let label = v.unwrap_or("nan").to_string();
            if !expected.contains(&label) {
                expected.push(label);
            }
        }

        let out = build_chart(&t, &ChartRequest::new(ChartKind::Scatter, "x", "y", "z").color("g")).unwrap();
        let labels: Vec<String> = out.figure.data.iter().map(|tr| tr.name().unwrap().to_string()).collect();
        prop_assert_eq!(labels, expected);
    }

    /// Scaling every size by a constant leaves pixel sizes unchanged.
    #[test]
    fn prop_bubble_sizes_scale_invariant((x, s, g) in row_strategy(), k in 0.25f64..16.0) {
        let scaled: Vec<f64> = s.iter().map(|v| v * k).collect();
        for color in [None, Some("g")] {
            let mut req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("s");
            req.color = color.map(str::to_string);
            let a = pixel_sizes(&build_chart(&table(&x, &s, &g), &req).unwrap().figure);
            let b = pixel_sizes(&build_chart(&table(&x, &scaled, &g), &req).unwrap().figure);
            for (pa, pb) in a.iter().zip(&b) {
                prop_assert!((pa - pb).abs() <= pa.abs() * 1e-4, "{} vs {}", pa, pb);
            }
        }
    }

    /// Line traces are ordered by x, with NaN x values at the end.
    #[test]
    fn prop_line_x_non_decreasing((x, s, g) in row_strategy()) {
        let t = table(&x, &s, &g);
        for color in [None, Some("g")] {
            let mut req = ChartRequest::new(ChartKind::Line, "x", "y", "z");
            req.color = color.map(str::to_string);
            let out = build_chart(&t, &req).unwrap();
            for trace in out.figure.point_traces() {
                let finite = trace.x.iter().take_while(|v| !v.is_nan()).count();
                prop_assert!(trace.x[finite..].iter().all(|v| v.is_nan()));
                prop_assert!(trace.x[..finite].windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}

/// Flat (x, y, z) rows drawn from a small grid, with repeats and gaps.
fn surface_strategy() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    (1usize..6, 1usize..6).prop_flat_map(|(nx, ny)| {
        prop::collection::vec(
            (0..nx, 0..ny, -1000.0f64..1000.0).prop_map(|(i, j, z)| (i as f64 * 0.5, j as f64 - 2.0, z)),
            1..40,
        )
    })
}

fn sorted_distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Each z lands in the cell of its own (x, y); repeated pairs keep the
    /// first value and unreached cells stay empty.
    #[test]
    fn prop_surface_cells_hold_their_own_z(rows in surface_strategy()) {
        let x: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let y: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let z: Vec<f64> = rows.iter().map(|r| r.2).collect();
        let xs = sorted_distinct(x.iter().copied());
        let ys = sorted_distinct(y.iter().copied());
        let cells = xs.len() * ys.len();

        let grid = match reshape_surface(&x, &y, &z) {
            Ok(grid) => grid,
            Err(e) => {
                prop_assert!(cells > rows.len());
                prop_assert!(matches!(e, Error::ShapeMismatch { .. }), "{}", e);
                return Ok(());
            }
        };
        prop_assert!(cells <= rows.len());
        prop_assert_eq!(&grid.x, &xs);
        prop_assert_eq!(&grid.y, &ys);

        let mut first: HashMap<(u64, u64), f64> = HashMap::new();
        for &(xv, yv, zv) in &rows {
            first.entry((xv.to_bits(), yv.to_bits())).or_insert(zv);
        }
        for (i, &yv) in ys.iter().enumerate() {
            for (j, &xv) in xs.iter().enumerate() {
                match first.get(&(xv.to_bits(), yv.to_bits())) {
                    Some(&expected) => {
                        prop_assert_eq!(grid.z[i][j], expected);
                    }
                    None => {
                        prop_assert!(grid.z[i][j].is_nan());
                    }
                }
            }
        }

        let complete = first.len() == cells && cells == rows.len();
        prop_assert_eq!(grid.check.filled, first.len());
        prop_assert_eq!(grid.check.warning().is_none(), complete);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

fn xyz() -> Table {
    Table::new()
        .with_numeric("x", &[1.0, 2.0, 3.0])
        .unwrap()
        .with_numeric("y", &[1.0, 1.0, 1.0])
        .unwrap()
        .with_numeric("z", &[10.0, 20.0, 30.0])
        .unwrap()
}

#[test]
fn scenario_scatter_without_color() {
    let out = build_chart(&xyz(), &ChartRequest::new(ChartKind::Scatter, "x", "y", "z")).unwrap();
    assert_eq!(out.figure.trace_count(), 1);
    let t = out.figure.data[0].as_points().unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.marker.color, Some(ColorValue::Values(vec![10.0, 20.0, 30.0])));
    assert!(t.marker.colorscale.is_some());
    assert!(t.name.is_none());
}

#[test]
fn scenario_scatter_with_categorical_color() {
    let t = xyz().with_categorical("g", &["A", "B", "A"]).unwrap();
    let out = build_chart(&t, &ChartRequest::new(ChartKind::Scatter, "x", "y", "z").color("g")).unwrap();
    let traces: Vec<_> = out.figure.point_traces().collect();
    assert_eq!(traces.len(), 2);
    assert_eq!((traces[0].name.as_deref(), traces[0].rows.as_slice()), (Some("A"), &[0, 2][..]));
    assert_eq!((traces[1].name.as_deref(), traces[1].rows.as_slice()), (Some("B"), &[1][..]));
}

#[test]
fn scenario_surface_complete_grid() {
    let t = Table::new()
        .with_numeric("x", &[0.0, 0.0, 1.0, 1.0])
        .unwrap()
        .with_numeric("y", &[0.0, 1.0, 0.0, 1.0])
        .unwrap()
        .with_numeric("z", &[1.0, 2.0, 3.0, 4.0])
        .unwrap();
    let out = build_chart(&t, &ChartRequest::new(ChartKind::Surface, "x", "y", "z")).unwrap();
    assert!(out.warnings.is_empty());
    let s = out.figure.data[0].as_surface().unwrap();
    assert_eq!(s.x, vec![0.0, 1.0]);
    assert_eq!(s.y, vec![0.0, 1.0]);
    assert_eq!(s.z, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
}

#[test]
fn scenario_surface_extra_rows_warn_without_shifting() {
    let t = Table::new()
        .with_numeric("x", &[1.0, 0.0, 1.0, 0.0, 1.0])
        .unwrap()
        .with_numeric("y", &[1.0, 0.0, 0.0, 1.0, 1.0])
        .unwrap()
        .with_numeric("z", &[4.0, 1.0, 3.0, 2.0, 99.0])
        .unwrap();
    let out = build_chart(&t, &ChartRequest::new(ChartKind::Surface, "x", "y", "z")).unwrap();
    assert_eq!(out.warnings.len(), 1);
    let s = out.figure.data[0].as_surface().unwrap();
    assert_eq!(s.z, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
}

#[test]
fn scenario_bubble_doubling() {
    let req = ChartRequest::new(ChartKind::Bubble, "x", "y", "z").size("s");
    let base = xyz().with_numeric("s", &[10.0, 20.0, 40.0]).unwrap();
    let doubled = xyz().with_numeric("s", &[20.0, 40.0, 80.0]).unwrap();

    let out = build_chart(&base, &req).unwrap();
    let marker = &out.figure.data[0].as_points().unwrap().marker;
    assert!((marker.sizeref.unwrap() - 2.0 * 40.0 / 40.0_f64.powi(2)).abs() < 1e-12);
    assert_eq!(marker.sizemin, Some(4.0));

    assert_eq!(pixel_sizes(&out.figure), pixel_sizes(&build_chart(&doubled, &req).unwrap().figure));
}
