//! 3D surface plot.
//!
//! The grid axes are the sorted distinct x and y values. Each row's z lands in
//! the cell of its own `(x, y)` pair; when a pair repeats, the first row wins.
//! Cells no row reaches stay NaN.

use tracing::warn;

use crate::error::{Error, Result};
use crate::figure::{SurfaceTrace, Trace};
use crate::scale::Colorscale;

use super::{ChartContext, ChartWarning};

/// Result of the grid-completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCheck {
    /// Distinct non-NaN x values.
    pub unique_x: usize,
    /// Distinct non-NaN y values.
    pub unique_y: usize,
    /// Total rows.
    pub rows: usize,
    /// Grid cells that received a row.
    pub filled: usize,
}

impl GridCheck {
    /// Number of grid cells, or `None` if it overflows `usize`.
    #[must_use]
    pub fn cells(&self) -> Option<usize> {
        self.unique_x.checked_mul(self.unique_y)
    }

    /// True when every row fills its own cell and no cell is left empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells().is_some_and(|cells| cells == self.rows && self.filled == cells)
    }

    /// Warning to surface when the grid is incomplete.
    #[must_use]
    pub fn warning(&self) -> Option<ChartWarning> {
        (!self.is_complete()).then_some(ChartWarning::IncompleteGrid {
            unique_x: self.unique_x,
            unique_y: self.unique_y,
            rows: self.rows,
            filled: self.filled,
        })
    }

    fn mismatch(&self) -> Error {
        Error::ShapeMismatch { unique_x: self.unique_x, unique_y: self.unique_y, rows: self.rows }
    }
}

/// A z grid over distinct x and y values; `z[i][j]` sits at `(x[j], y[i])`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    /// Distinct x values, ascending.
    pub x: Vec<f64>,
    /// Distinct y values, ascending.
    pub y: Vec<f64>,
    /// One row of heights per y value; NaN where no row supplied a value.
    pub z: Vec<Vec<f64>>,
    /// Completeness check that produced this grid.
    pub check: GridCheck,
}

fn distinct(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

fn position(axis: &[f64], value: f64) -> Option<usize> {
    if value.is_nan() {
        return None;
    }
    axis.binary_search_by(|candidate| candidate.total_cmp(&value)).ok()
}

/// Reshape flat `x`, `y`, `z` columns into a surface grid.
///
/// Every row is placed at its own `(x, y)` cell. Repeated pairs keep the
/// first row's z, and rows with a NaN coordinate are skipped, so an
/// incomplete grid is still drawn on a best-effort basis.
///
/// # Errors
///
/// Returns [`Error::EmptyData`] when there is nothing to draw and
/// [`Error::ShapeMismatch`] when there are fewer rows than grid cells.
pub fn reshape_surface(x: &[f64], y: &[f64], z: &[f64]) -> Result<SurfaceGrid> {
    let xs = distinct(x);
    let ys = distinct(y);
    let mut check = GridCheck { unique_x: xs.len(), unique_y: ys.len(), rows: z.len(), filled: 0 };

    let cells = check.cells().ok_or_else(|| check.mismatch())?;
    if check.rows == 0 || cells == 0 {
        return Err(Error::EmptyData);
    }
    if cells > check.rows {
        return Err(check.mismatch());
    }

    let mut grid = vec![vec![f64::NAN; xs.len()]; ys.len()];
    let mut taken = vec![vec![false; xs.len()]; ys.len()];
    for ((&xv, &yv), &zv) in x.iter().zip(y).zip(z) {
        let (Some(j), Some(i)) = (position(&xs, xv), position(&ys, yv)) else {
            continue;
        };
        if !taken[i][j] {
            taken[i][j] = true;
            grid[i][j] = zv;
            check.filled += 1;
        }
    }

    Ok(SurfaceGrid { x: xs, y: ys, z: grid, check })
}

pub(super) fn traces(
    ctx: &ChartContext<'_>,
    warnings: &mut Vec<ChartWarning>,
) -> Result<Vec<Trace>> {
    let grid = reshape_surface(ctx.x, ctx.y, ctx.z).map_err(|e| {
        if matches!(e, Error::ShapeMismatch { .. }) {
            warn!(x = %ctx.request.x, y = %ctx.request.y, "surface grid cannot be filled: {e}");
        }
        e
    })?;

    warnings.extend(grid.check.warning());

    Ok(vec![Trace::Surface(SurfaceTrace {
        x: grid.x,
        y: grid.y,
        z: grid.z,
        colorscale: Colorscale::Magma,
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{build_chart, ChartKind, ChartRequest};
    use crate::table::Table;

    #[test]
    fn test_complete_grid() {
        let grid = reshape_surface(&[0.0, 0.0, 1.0, 1.0], &[0.0, 1.0, 0.0, 1.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(grid.x, vec![0.0, 1.0]);
        assert_eq!(grid.y, vec![0.0, 1.0]);
        assert_eq!(grid.z, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
        assert!(grid.check.is_complete());
        assert!(grid.check.warning().is_none());
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let grid = reshape_surface(&[1.0, 0.0, 1.0, 0.0], &[1.0, 1.0, 0.0, 0.0], &[4.0, 2.0, 3.0, 1.0])
            .unwrap();
        assert_eq!(grid.z, vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    }

    #[test]
    fn test_extra_row_keeps_values_in_their_cells() {
        let grid = reshape_surface(
            &[0.0, 0.0, 0.0, 1.0, 1.0],
            &[0.0, 0.0, 1.0, 0.0, 1.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();
        // (0, 0) appears twice; the first row wins and nothing shifts.
        assert_eq!(grid.z, vec![vec![1.0, 4.0], vec![3.0, 5.0]]);
        assert_eq!(
            grid.check.warning(),
            Some(ChartWarning::IncompleteGrid { unique_x: 2, unique_y: 2, rows: 5, filled: 4 })
        );
    }

    #[test]
    fn test_duplicate_pair_leaves_gap() {
        let grid = reshape_surface(&[0.0, 0.0, 1.0, 1.0], &[0.0, 0.0, 0.0, 1.0], &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(grid.z[0], vec![1.0, 3.0]);
        assert!(grid.z[1][0].is_nan());
        assert_eq!(grid.z[1][1], 4.0);
        assert!(!grid.check.is_complete());
        assert_eq!(
            grid.check.warning(),
            Some(ChartWarning::IncompleteGrid { unique_x: 2, unique_y: 2, rows: 4, filled: 3 })
        );
    }

    #[test]
    fn test_nan_coordinates_are_skipped() {
        let grid = reshape_surface(
            &[0.0, 1.0, f64::NAN, 0.0, 1.0],
            &[0.0, 0.0, 0.0, 1.0, 1.0],
            &[1.0, 2.0, 9.0, 3.0, 4.0],
        )
        .unwrap();
        assert_eq!(grid.z, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(grid.check.filled, 4);
        assert!(grid.check.warning().is_some());
    }

    #[test]
    fn test_missing_cells_is_shape_mismatch() {
        let err = reshape_surface(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { unique_x: 3, unique_y: 3, rows: 3 }));
    }

    #[test]
    fn test_cell_count_overflow() {
        let check = GridCheck { unique_x: usize::MAX, unique_y: 2, rows: 10, filled: 0 };
        assert_eq!(check.cells(), None);
        assert!(!check.is_complete());
        assert!(matches!(check.mismatch(), Error::ShapeMismatch { unique_y: 2, .. }));
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(reshape_surface(&[], &[], &[]), Err(Error::EmptyData)));
        assert!(matches!(
            reshape_surface(&[f64::NAN], &[1.0], &[1.0]),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_surface_chart() {
        let table = Table::new()
            .with_numeric("x", &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .with_numeric("y", &[0.0, 1.0, 0.0, 1.0])
            .unwrap()
            .with_numeric("z", &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let out = build_chart(&table, &ChartRequest::new(ChartKind::Surface, "x", "y", "z")).unwrap();
        assert!(out.warnings.is_empty());
        let s = out.figure.data[0].as_surface().unwrap();
        assert_eq!(s.colorscale, Colorscale::Magma);

        let json = serde_json::to_value(&out.figure).unwrap();
        assert_eq!(json["data"][0]["type"], "surface");
        assert_eq!(json["data"][0]["z"], serde_json::json!([[1.0, 3.0], [2.0, 4.0]]));
    }

    #[test]
    fn test_surface_chart_warns() {
        let table = Table::new()
            .with_numeric("x", &[0.0, 1.0, 0.0, 1.0, 0.0])
            .unwrap()
            .with_numeric("y", &[0.0, 0.0, 1.0, 1.0, 0.0])
            .unwrap()
            .with_numeric("z", &[1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        let out = build_chart(&table, &ChartRequest::new(ChartKind::Surface, "x", "y", "z")).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].to_string().contains("5 total points"));

        let s = out.figure.data[0].as_surface().unwrap();
        assert_eq!(s.z, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_surface_chart_gap_serializes_as_null() {
        let table = Table::new()
            .with_numeric("x", &[0.0, 0.0, 1.0, 1.0])
            .unwrap()
            .with_numeric("y", &[0.0, 0.0, 0.0, 1.0])
            .unwrap()
            .with_numeric("z", &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let out = build_chart(&table, &ChartRequest::new(ChartKind::Surface, "x", "y", "z")).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].to_string().contains("1 grid cell has no value"));

        let json = serde_json::to_value(&out.figure).unwrap();
        assert_eq!(json["data"][0]["z"], serde_json::json!([[1.0, 3.0], [null, 4.0]]));
    }
}
