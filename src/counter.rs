use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingRegion;
use crate::crossing::visit_crossing_cells;
use crate::error::{FracdimError, Result};
use crate::grid::GridGeometry;

/// What a [`GridOccupancyCounter`] marks as occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountingMode {
    /// Only the cells that contain an input point.
    #[default]
    Points,
    /// Additionally every cell that the polyline through consecutive points passes.
    Lines,
}

impl FromStr for CountingMode {
    type Err = FracdimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "points" => Ok(CountingMode::Points),
            "lines" => Ok(CountingMode::Lines),
            other => Err(FracdimError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for CountingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            CountingMode::Points => "points",
            CountingMode::Lines => "lines",
        })
    }
}

/// Largest grid, in cells, that a counter allocates occupancy flags for.
pub const MAX_OCCUPANCY_CELLS: usize = 1 << 30;

/// Dense occupancy flags, one bit per cell.
#[derive(Clone, Debug, Default)]
struct OccupancyBits {
    words: Vec<u64>,
}

impl OccupancyBits {
    /// `None` when the grid is above [`MAX_OCCUPANCY_CELLS`] or the allocation fails.
    fn with_cells(cells: usize) -> Option<Self> {
        if cells > MAX_OCCUPANCY_CELLS {
            return None;
        }
        let len = cells.div_ceil(64);
        let mut words = Vec::new();
        words.try_reserve_exact(len).ok()?;
        words.resize(len, 0);
        Some(Self { words })
    }

    #[inline]
    fn mark(&mut self, index: usize) {
        self.words[index / 64] |= 1 << (index % 64);
    }

    fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// Counts the grid cells of a [`BoundingRegion`] occupied by a point set or polyline.
///
/// The counter owns its occupancy buffer, which is reset at the start of every
/// [`calculate`](Self::calculate). Use one counter per thread for parallel sweeps; the
/// region can be cloned freely.
#[derive(Clone, Debug)]
pub struct GridOccupancyCounter {
    region: Option<BoundingRegion>,
    grid: Option<GridGeometry>,
    mode: CountingMode,
    occupied: OccupancyBits,
}

impl GridOccupancyCounter {
    /// Creates an unconfigured counter. Call [`set_size`](Self::set_size) and
    /// [`set_cells_per_axis`](Self::set_cells_per_axis) before counting.
    pub fn new(mode: CountingMode) -> Self {
        Self {
            region: None,
            grid: None,
            mode,
            occupied: OccupancyBits::default(),
        }
    }

    /// Creates an unconfigured counter from a mode tag, `"points"` or `"lines"`.
    pub fn with_mode_name(mode: &str) -> Result<Self> {
        Ok(Self::new(mode.parse()?))
    }

    /// Creates a counter bound to `region` at `cells_per_axis` cells per axis.
    pub fn configure(region: BoundingRegion, cells_per_axis: usize, mode: CountingMode) -> Result<Self> {
        let mut counter = Self::new(mode);
        counter.set_size(region)?;
        counter.set_cells_per_axis(cells_per_axis)?;
        Ok(counter)
    }

    /// Binds the counter to a new region, keeping the current resolution if one is set.
    ///
    /// On error the counter keeps its previous region and grid.
    pub fn set_size(&mut self, region: BoundingRegion) -> Result<()> {
        match self.cells_per_axis() {
            Some(n) => {
                let (grid, occupied) = self.build_grid(&region, n)?;
                self.region = Some(region);
                self.grid = Some(grid);
                self.occupied = occupied;
            }
            None => self.region = Some(region),
        }
        Ok(())
    }

    /// Sets the resolution and reallocates the occupancy buffer to `n^dim` cells.
    ///
    /// On error the counter keeps its previous grid.
    pub fn set_cells_per_axis(&mut self, cells_per_axis: usize) -> Result<()> {
        let region = self.region.as_ref().ok_or(FracdimError::GridUnconfigured)?;
        let (grid, occupied) = self.build_grid(region, cells_per_axis)?;
        self.grid = Some(grid);
        self.occupied = occupied;
        Ok(())
    }

    fn build_grid(&self, region: &BoundingRegion, cells_per_axis: usize) -> Result<(GridGeometry, OccupancyBits)> {
        let grid = GridGeometry::new(region, cells_per_axis)?;
        let occupied = OccupancyBits::with_cells(grid.total_cells()).ok_or(FracdimError::GridTooLarge {
            cells_per_axis,
            dim: grid.dim(),
        })?;
        debug!(
            "[GridOccupancyCounter] configured: dim={} cells_per_axis={} total_cells={} mode={}",
            grid.dim(),
            cells_per_axis,
            grid.total_cells(),
            self.mode
        );
        Ok((grid, occupied))
    }

    pub fn mode(&self) -> CountingMode {
        self.mode
    }

    pub fn region(&self) -> Option<&BoundingRegion> {
        self.region.as_ref()
    }

    pub fn grid(&self) -> Option<&GridGeometry> {
        self.grid.as_ref()
    }

    pub fn cells_per_axis(&self) -> Option<usize> {
        self.grid.as_ref().map(GridGeometry::cells_per_axis)
    }

    /// Counts the distinct cells occupied by `points` under the active mode.
    ///
    /// Every point must have exactly as many coordinates as the region and lie inside it.
    pub fn calculate<P: AsRef<[f64]>>(&mut self, points: &[P]) -> Result<usize> {
        let grid = self.grid.as_ref().ok_or(FracdimError::GridUnconfigured)?;
        self.occupied.clear();

        match self.mode {
            CountingMode::Points => mark_points(grid, &mut self.occupied, points)?,
            CountingMode::Lines => mark_lines(grid, &mut self.occupied, points)?,
        }

        let count = self.occupied.count();
        debug!(
            "[GridOccupancyCounter] calculate: mode={} points={} cells_per_axis={} occupied={}",
            self.mode,
            points.len(),
            grid.cells_per_axis(),
            count
        );
        Ok(count)
    }
}

fn mark_points<P: AsRef<[f64]>>(grid: &GridGeometry, occupied: &mut OccupancyBits, points: &[P]) -> Result<()> {
    let mut idx = vec![0; grid.dim()];
    for (i, p) in points.iter().enumerate() {
        locate(grid, i, p.as_ref(), &mut idx)?;
        occupied.mark(grid.flatten(&idx));
    }
    Ok(())
}

fn mark_lines<P: AsRef<[f64]>>(grid: &GridGeometry, occupied: &mut OccupancyBits, points: &[P]) -> Result<()> {
    if points.len() < 2 {
        return mark_points(grid, occupied, points);
    }

    let mut idx = vec![0; grid.dim()];
    for (i, pair) in points.windows(2).enumerate() {
        let (prev, curr) = (pair[0].as_ref(), pair[1].as_ref());
        locate(grid, i, prev, &mut idx)?;
        occupied.mark(grid.flatten(&idx));
        locate(grid, i + 1, curr, &mut idx)?;
        occupied.mark(grid.flatten(&idx));

        let mut crossings = 0usize;
        visit_crossing_cells(prev, curr, grid, |cell| {
            occupied.mark(grid.flatten(cell));
            crossings += 1;
        })?;
        trace!("[GridOccupancyCounter] segment {}: {} crossings", i, crossings);
    }
    Ok(())
}

/// Cell indices of the `n`-th input point, reporting its position on failure.
fn locate(grid: &GridGeometry, n: usize, point: &[f64], out: &mut [usize]) -> Result<()> {
    grid.cell_indices(point, out).map_err(|e| match e {
        FracdimError::PointOutsideRegion { axis, value, .. } => {
            FracdimError::PointOutsideRegion { point: n, axis, value }
        }
        other => other,
    })
}
