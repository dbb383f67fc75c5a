//! Line geometry for the polyline counting mode.
//!
//! A segment is swept axis by axis: every internal grid boundary it spans along an axis yields
//! one crossing point, which is moved back by a tenth of a cell along that axis so that it
//! lands unambiguously in the cell on the lower-index side of the boundary.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::grid::GridGeometry;

/// Fraction of a cell that crossing points are moved back along the swept axis.
pub const CROSSING_NUDGE: f64 = 0.1;

/// Point on the infinite line through `begin` and `end` whose `axis` coordinate is `axis_value`.
///
/// The result is extrapolated when `axis_value` lies outside the segment. Returns `None` when
/// the line does not vary along `axis`.
pub fn point_on_line(begin: &[f64], end: &[f64], axis: usize, axis_value: f64) -> Option<Vec<f64>> {
    let mut target = vec![0.0; begin.len()];
    write_point_on_line(begin, end, axis, axis_value, &mut target).then_some(target)
}

fn write_point_on_line(begin: &[f64], end: &[f64], axis: usize, axis_value: f64, target: &mut [f64]) -> bool {
    let span = end[axis] - begin[axis];
    if span == 0.0 {
        return false;
    }
    let progress = (axis_value - begin[axis]) / span;
    for (i, t) in target.iter_mut().enumerate() {
        *t = if i == axis {
            axis_value
        } else {
            (1.0 - progress) * begin[i] + progress * end[i]
        };
    }
    true
}

/// Visits the cell of every boundary crossing of the segment `start -> end`.
///
/// The endpoint cells themselves are not reported unless a crossing lands in them. A cell can
/// be visited more than once when crossings along different axes fall into it.
pub fn visit_crossing_cells<F>(start: &[f64], end: &[f64], grid: &GridGeometry, mut visitor: F) -> Result<()>
where
    F: FnMut(&[usize]),
{
    let dim = grid.dim();
    let mut begin_idx = vec![0; dim];
    let mut end_idx = vec![0; dim];
    grid.cell_indices(start, &mut begin_idx)?;
    grid.cell_indices(end, &mut end_idx)?;

    let mut crossing = vec![0.0; dim];
    let mut cell = vec![0; dim];

    for axis in 0..dim {
        let lo = begin_idx[axis].min(end_idx[axis]);
        let hi = begin_idx[axis].max(end_idx[axis]);

        for boundary in (lo + 1)..=hi {
            let value = grid.lower_boundary(axis, boundary);
            if !write_point_on_line(start, end, axis, value, &mut crossing) {
                continue;
            }
            crossing[axis] -= grid.cell_size(axis) * CROSSING_NUDGE;
            grid.cell_indices(&crossing, &mut cell)?;
            visitor(&cell);
        }
    }
    Ok(())
}

/// Distinct cells that the segment `start -> end` crosses into, excluding the endpoint cells
/// unless a crossing lands in them.
pub fn find_crossing_cells(start: &[f64], end: &[f64], grid: &GridGeometry) -> Result<BTreeSet<Vec<usize>>> {
    let mut cells = BTreeSet::new();
    visit_crossing_cells(start, end, grid, |c| {
        cells.insert(c.to_vec());
    })?;
    Ok(cells)
}

/// Every cell the segment `start -> end` passes through, endpoints included.
pub fn segment_cells(start: &[f64], end: &[f64], grid: &GridGeometry) -> Result<BTreeSet<Vec<usize>>> {
    let mut cells = find_crossing_cells(start, end, grid)?;
    let mut idx = vec![0; grid.dim()];
    for p in [start, end] {
        grid.cell_indices(p, &mut idx)?;
        cells.insert(idx.clone());
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingRegion;

    fn grid_2d() -> GridGeometry {
        let region = BoundingRegion::from_corners(&[0.0, 0.0], &[10.0, 10.0]).unwrap();
        GridGeometry::new(&region, 10).unwrap()
    }

    #[test]
    fn test_point_on_line_1d() {
        assert_eq!(point_on_line(&[0.0], &[1.0], 0, 0.25), Some(vec![0.25]));
    }

    #[test]
    fn test_point_on_line_between_points() {
        assert_eq!(point_on_line(&[1.0, 1.0], &[3.0, 2.0], 0, 2.0), Some(vec![2.0, 1.5]));
    }

    #[test]
    fn test_point_on_line_extrapolates() {
        assert_eq!(point_on_line(&[1.0, 1.0], &[3.0, 2.0], 0, 4.0), Some(vec![4.0, 2.5]));
        assert_eq!(point_on_line(&[1.0, 1.0], &[3.0, 2.0], 0, 0.0), Some(vec![0.0, 0.5]));
    }

    #[test]
    fn test_point_on_line_degenerate_axis() {
        assert_eq!(point_on_line(&[1.0, 1.0], &[1.0, 2.0], 0, 1.0), None);
    }

    #[test]
    fn test_crossings_within_one_row() {
        let cells = find_crossing_cells(&[0.1, 0.1], &[9.9, 0.9], &grid_2d()).unwrap();
        let expected: BTreeSet<Vec<usize>> = (0..9).map(|x| vec![x, 0]).collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_crossing_into_next_row() {
        let cells = segment_cells(&[0.1, 0.1], &[9.9, 1.9], &grid_2d()).unwrap();
        assert_eq!(cells.len(), 11);
        assert!(cells.contains(&vec![9, 1]));
        assert!(cells.contains(&vec![0, 0]));
    }

    #[test]
    fn test_no_crossings_inside_one_cell() {
        let cells = find_crossing_cells(&[3.2, 4.1], &[3.8, 4.9], &grid_2d()).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_crossing_direction_does_not_matter() {
        let grid = grid_2d();
        let forward = segment_cells(&[0.3, 0.6], &[7.7, 3.2], &grid).unwrap();
        let backward = segment_cells(&[7.7, 3.2], &[0.3, 0.6], &grid).unwrap();
        assert_eq!(forward, backward);
    }
}
