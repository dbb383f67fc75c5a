use crate::bounds::BoundingRegion;
use crate::error::{FracdimError, Result};

/// Uniform subdivision of a [`BoundingRegion`] into `cells_per_axis^dim` equal cells.
///
/// Cells are half-open `[lo, hi)` along every axis, except the last cell of each axis which
/// also owns the region's upper boundary. Cell index vectors are flattened with axis 0 as the
/// fastest varying axis.
#[derive(Clone, Debug, PartialEq)]
pub struct GridGeometry {
    cells_per_axis: usize,
    min: Vec<f64>,
    max: Vec<f64>,
    cell_size: Vec<f64>,
    strides: Vec<usize>,
    total_cells: usize,
}

impl GridGeometry {
    /// Creates the grid for `region` at the given resolution.
    pub fn new(region: &BoundingRegion, cells_per_axis: usize) -> Result<Self> {
        if cells_per_axis == 0 {
            return Err(FracdimError::InvalidResolution(cells_per_axis));
        }
        let (min, max) = region.corners()?;
        let dim = region.dim();

        if let Some(axis) = (0..dim).find(|&d| !(max[d] - min[d] > 0.0)) {
            return Err(FracdimError::DegenerateRegion { axis });
        }

        let mut strides = Vec::with_capacity(dim);
        let mut total = 1usize;
        for _ in 0..dim {
            strides.push(total);
            total = total
                .checked_mul(cells_per_axis)
                .ok_or(FracdimError::GridTooLarge { cells_per_axis, dim })?;
        }

        let n = cells_per_axis as f64;
        let cell_size = (0..dim).map(|d| (max[d] - min[d]) / n).collect();

        Ok(Self {
            cells_per_axis,
            min: min.to_vec(),
            max: max.to_vec(),
            cell_size,
            strides,
            total_cells: total,
        })
    }

    pub fn dim(&self) -> usize {
        self.min.len()
    }

    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Offsets used to flatten a cell index vector: `strides[0] = 1`,
    /// `strides[i] = strides[i - 1] * cells_per_axis`.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Edge length of one cell along `axis`.
    pub fn cell_size(&self, axis: usize) -> f64 {
        self.cell_size[axis]
    }

    /// Coordinate of the lower boundary of cell `index` along `axis`.
    pub fn lower_boundary(&self, axis: usize, index: usize) -> f64 {
        self.min[axis] + (self.max[axis] - self.min[axis]) * (index as f64 / self.cells_per_axis as f64)
    }

    /// Writes the cell index of `point` along each axis into `out`.
    ///
    /// Indices truncate toward zero and the value `cells_per_axis` is clamped to the last cell,
    /// so the upper boundary of the region is closed. Anything further out is rejected;
    /// the reported `point` in the error is always 0 here and is filled in by callers.
    pub fn cell_indices(&self, point: &[f64], out: &mut [usize]) -> Result<()> {
        if point.len() != self.dim() {
            return Err(FracdimError::DimensionMismatch {
                expected: self.dim(),
                actual: point.len(),
            });
        }

        let n = self.cells_per_axis as f64;
        for (axis, &value) in point.iter().enumerate() {
            let rel = (value - self.min[axis]) / (self.max[axis] - self.min[axis]);
            let raw = (rel * n).trunc();
            // NaN fails both comparisons
            if !(raw >= 0.0 && raw <= n) {
                return Err(FracdimError::PointOutsideRegion { point: 0, axis, value });
            }
            out[axis] = (raw as usize).min(self.cells_per_axis - 1);
        }
        Ok(())
    }

    /// Flat position of a cell index vector in a dense cell array.
    #[inline]
    pub fn flatten(&self, indices: &[usize]) -> usize {
        indices.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
    }

    /// Inverse of [`flatten`](Self::flatten).
    pub fn unflatten(&self, mut index: usize) -> Vec<usize> {
        let mut indices = vec![0; self.dim()];
        for axis in (0..self.dim()).rev() {
            indices[axis] = index / self.strides[axis];
            index %= self.strides[axis];
        }
        indices
    }
}
