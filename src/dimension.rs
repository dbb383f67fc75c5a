//! Box-counting dimension from occupancy counts at several resolutions.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingRegion;
use crate::counter::{CountingMode, GridOccupancyCounter};
use crate::error::{FracdimError, Result};

/// Resolution sweep used by [`estimate_dimension`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Coarsest resolution, in cells per axis.
    pub min_cells_per_axis: usize,
    /// Finest resolution, in cells per axis.
    pub max_cells_per_axis: usize,
    /// Growth factor between consecutive resolutions.
    pub ratio: f64,
    pub mode: CountingMode,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_cells_per_axis: 2,
            max_cells_per_axis: 64,
            ratio: 2.0,
            mode: CountingMode::Points,
        }
    }
}

impl EstimatorConfig {
    /// Strictly increasing geometric sequence of resolutions in
    /// `[min_cells_per_axis, max_cells_per_axis]`.
    pub fn resolutions(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let start = self.min_cells_per_axis.max(1);
        if start > self.max_cells_per_axis {
            return out;
        }
        let ratio = if self.ratio > 1.0 { self.ratio } else { 2.0 };

        let limit = self.max_cells_per_axis as f64;
        let mut value = start as f64;
        while value.is_finite() && value.round() <= limit {
            let n = value.round() as usize;
            if out.last().is_none_or(|&last| n > last) {
                out.push(n);
            }
            value *= ratio;
        }
        out
    }
}

/// Occupied cell count at one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxCount {
    pub cells_per_axis: usize,
    pub count: usize,
}

impl BoxCount {
    /// `ln(1 / cell_size)` with the cell size measured relative to the region.
    pub fn log_inverse_size(&self) -> f64 {
        (self.cells_per_axis as f64).ln()
    }

    pub fn log_count(&self) -> f64 {
        (self.count as f64).ln()
    }
}

/// Least-squares fit of `ln(count)` against `ln(1 / cell_size)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionEstimate {
    /// Slope of the fit, the box-counting dimension.
    pub dimension: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit.
    pub r_squared: f64,
    pub samples: Vec<BoxCount>,
}

/// Occupied cell counts of `points` at every resolution of `config`.
///
/// Resolutions are counted in parallel, each by its own counter.
pub fn box_counts<P>(region: &BoundingRegion, points: &[P], config: &EstimatorConfig) -> Result<Vec<BoxCount>>
where
    P: AsRef<[f64]> + Sync,
{
    config
        .resolutions()
        .into_par_iter()
        .map(|n| -> Result<BoxCount> {
            let mut counter = GridOccupancyCounter::configure(region.clone(), n, config.mode)?;
            let count = counter.calculate(points)?;
            debug!("[BoxCount] cells_per_axis={} count={}", n, count);
            Ok(BoxCount { cells_per_axis: n, count })
        })
        .collect()
}

/// Fits the box-counting dimension to a set of counts. Empty counts are skipped.
pub fn fit_dimension(samples: &[BoxCount]) -> Result<DimensionEstimate> {
    let usable: Vec<&BoxCount> = samples.iter().filter(|s| s.count > 0).collect();
    let distinct = {
        let mut sizes: Vec<usize> = usable.iter().map(|s| s.cells_per_axis).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes.len()
    };
    if distinct < 2 {
        return Err(FracdimError::InsufficientSamples { needed: 2, got: distinct });
    }

    let n = usable.len() as f64;
    let mean_x = usable.iter().map(|s| s.log_inverse_size()).sum::<f64>() / n;
    let mean_y = usable.iter().map(|s| s.log_count()).sum::<f64>() / n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for s in &usable {
        let dx = s.log_inverse_size() - mean_x;
        let dy = s.log_count() - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let dimension = sxy / sxx;
    let intercept = mean_y - dimension * mean_x;
    let r_squared = if syy > 0.0 { (sxy * sxy) / (sxx * syy) } else { 1.0 };

    if r_squared < 0.9 {
        warn!("[BoxCount] poor log-log fit: r^2={:.3} over {} samples", r_squared, usable.len());
    }

    Ok(DimensionEstimate {
        dimension,
        intercept,
        r_squared,
        samples: samples.to_vec(),
    })
}

/// Sweeps the resolutions of `config` and fits the box-counting dimension of `points`.
pub fn estimate_dimension<P>(region: &BoundingRegion, points: &[P], config: &EstimatorConfig) -> Result<DimensionEstimate>
where
    P: AsRef<[f64]> + Sync,
{
    let samples = box_counts(region, points, config)?;
    let estimate = fit_dimension(&samples)?;
    debug!(
        "[BoxCount] dimension={:.4} r^2={:.4} resolutions={}",
        estimate.dimension,
        estimate.r_squared,
        samples.len()
    );
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_resolutions() {
        assert_eq!(EstimatorConfig::default().resolutions(), vec![2, 4, 8, 16, 32, 64]);
    }

    #[test]
    fn test_resolutions_strictly_increase() {
        let config = EstimatorConfig {
            min_cells_per_axis: 1,
            max_cells_per_axis: 10,
            ratio: 1.3,
            ..Default::default()
        };
        let res = config.resolutions();
        assert_eq!(res.first(), Some(&1));
        assert!(res.windows(2).all(|w| w[0] < w[1]));
        assert!(res.iter().all(|&n| n <= 10));
    }

    #[test]
    fn test_unbounded_sweep_terminates() {
        let config = EstimatorConfig {
            min_cells_per_axis: 1,
            max_cells_per_axis: usize::MAX,
            ..Default::default()
        };
        let res = config.resolutions();
        assert!(res.len() <= 65);
        assert!(res.windows(2).all(|w| w[0] < w[1]));
        assert!(*res.last().unwrap() > usize::MAX / 2);

        let config = EstimatorConfig {
            ratio: f64::INFINITY,
            ..config
        };
        assert_eq!(config.resolutions(), vec![1]);
    }

    #[test]
    fn test_empty_sweep() {
        let config = EstimatorConfig {
            min_cells_per_axis: 10,
            max_cells_per_axis: 5,
            ..Default::default()
        };
        assert!(config.resolutions().is_empty());
    }

    #[test]
    fn test_fit_exact_power_law() {
        let samples: Vec<BoxCount> = [2usize, 4, 8, 16]
            .iter()
            .map(|&n| BoxCount { cells_per_axis: n, count: n * n })
            .collect();
        let fit = fit_dimension(&samples).unwrap();
        assert_relative_eq!(fit.dimension, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_needs_two_resolutions() {
        let samples = [
            BoxCount { cells_per_axis: 4, count: 3 },
            BoxCount { cells_per_axis: 4, count: 3 },
            BoxCount { cells_per_axis: 8, count: 0 },
        ];
        assert_eq!(
            fit_dimension(&samples),
            Err(FracdimError::InsufficientSamples { needed: 2, got: 1 })
        );
    }
}
