use crate::error::{FracdimError, Result};

/// Axis-aligned bounding region for N-dimensional space.
///
/// The region is the outer cell that a [`GridOccupancyCounter`](crate::GridOccupancyCounter)
/// subdivides. Corners may be left unset for staged construction; any geometric query on an
/// unset region fails with [`FracdimError::RegionUnset`].
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingRegion {
    dim: usize,
    min: Option<Vec<f64>>,
    max: Option<Vec<f64>>,
    /// Free flag for caller bookkeeping, never read by the crate.
    pub user_flag: bool,
}

impl BoundingRegion {
    /// Creates a region of dimension `dim`.
    ///
    /// With both corners given, min and max are resolved independently per axis, so `p1` and
    /// `p2` may be any two opposite corners. With a single corner it is stored as given (`p1`
    /// as min, `p2` as max) and the other one has to be supplied later through [`set`](Self::set).
    pub fn new(dim: usize, p1: Option<&[f64]>, p2: Option<&[f64]>) -> Result<Self> {
        for corner in [p1, p2].into_iter().flatten() {
            check_shape(dim, corner)?;
        }

        let (min, max) = match (p1, p2) {
            (Some(a), Some(b)) => {
                let min = a.iter().zip(b).map(|(x, y)| x.min(*y)).collect();
                let max = a.iter().zip(b).map(|(x, y)| x.max(*y)).collect();
                (Some(min), Some(max))
            }
            (a, b) => (a.map(<[f64]>::to_vec), b.map(<[f64]>::to_vec)),
        };

        Ok(Self {
            dim,
            min,
            max,
            user_flag: false,
        })
    }

    /// Creates a region from two opposite corners, taking the dimension from `p1`.
    pub fn from_corners(p1: &[f64], p2: &[f64]) -> Result<Self> {
        Self::new(p1.len(), Some(p1), Some(p2))
    }

    /// Smallest region enclosing every point of a data set.
    pub fn enclosing<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        let first = points.first().ok_or(FracdimError::RegionUnset)?.as_ref();
        let mut min = first.to_vec();
        let mut max = first.to_vec();

        for p in points {
            let p = p.as_ref();
            if p.len() != min.len() {
                return Err(FracdimError::DimensionMismatch {
                    expected: min.len(),
                    actual: p.len(),
                });
            }
            for (axis, &v) in p.iter().enumerate() {
                min[axis] = min[axis].min(v);
                max[axis] = max[axis].max(v);
            }
        }

        Ok(Self {
            dim: min.len(),
            min: Some(min),
            max: Some(max),
            user_flag: false,
        })
    }

    /// Replaces either corner wholesale. The per-axis ordering is not recomputed.
    pub fn set(&mut self, pmin: Option<&[f64]>, pmax: Option<&[f64]>) -> Result<()> {
        if let Some(p) = pmin {
            check_shape(self.dim, p)?;
            self.min = Some(p.to_vec());
        }
        if let Some(p) = pmax {
            check_shape(self.dim, p)?;
            self.max = Some(p.to_vec());
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn min(&self) -> Option<&[f64]> {
        self.min.as_deref()
    }

    pub fn max(&self) -> Option<&[f64]> {
        self.max.as_deref()
    }

    /// Both corners, or [`FracdimError::RegionUnset`] if either is missing.
    pub fn corners(&self) -> Result<(&[f64], &[f64])> {
        match (&self.min, &self.max) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(FracdimError::RegionUnset),
        }
    }

    /// Length of the region along `axis`.
    pub fn extent(&self, axis: usize) -> Result<f64> {
        let (min, max) = self.corners()?;
        match (min.get(axis), max.get(axis)) {
            (Some(lo), Some(hi)) => Ok(hi - lo),
            _ => Err(FracdimError::DimensionMismatch {
                expected: self.dim,
                actual: axis + 1,
            }),
        }
    }

    /// Checks whether `p` lies inside the region, both ends inclusive.
    ///
    /// `p` may have fewer coordinates than the region; only the given axes are tested.
    pub fn contains_point(&self, p: &[f64]) -> Result<bool> {
        if p.len() > self.dim {
            return Err(FracdimError::DimensionMismatch {
                expected: self.dim,
                actual: p.len(),
            });
        }
        let (min, max) = self.corners()?;

        Ok(p.iter()
            .zip(min.iter().zip(max))
            .all(|(v, (lo, hi))| v >= lo && v <= hi))
    }
}

fn check_shape(dim: usize, corner: &[f64]) -> Result<()> {
    if corner.len() != dim {
        return Err(FracdimError::InvalidCornerShape {
            expected: dim,
            actual: corner.len(),
        });
    }
    Ok(())
}
