//! Point sets with known box-counting dimension, used for validation and benchmarks.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::bounds::BoundingRegion;
use crate::error::{FracdimError, Result};

/// Koch snowflake built on a unit-side equilateral triangle.
///
/// Depth 1 is the bare triangle; every further level replaces each edge by four edges with an
/// outward bump, giving `3 * 4^(depth - 1)` vertices. The dimension of the limit curve is
/// `ln 4 / ln 3`.
#[derive(Clone, Debug)]
pub struct KochSnowflake {
    depth: u32,
    points: Vec<[f64; 2]>,
}

impl KochSnowflake {
    pub fn construct(depth: u32) -> Result<Self> {
        if depth == 0 {
            return Err(FracdimError::InvalidDepth(depth));
        }

        // Counter-clockwise, so the outward side of every edge is on its right.
        let h = 3f64.sqrt() / 2.0;
        let mut points = vec![[0.0, 0.0], [1.0, 0.0], [0.5, h]];
        let (sin, cos) = (-std::f64::consts::FRAC_PI_3).sin_cos();

        for _ in 1..depth {
            let mut next = Vec::with_capacity(points.len() * 4);
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let d = [(b[0] - a[0]) / 3.0, (b[1] - a[1]) / 3.0];
                let p1 = [a[0] + d[0], a[1] + d[1]];
                let p2 = [a[0] + 2.0 * d[0], a[1] + 2.0 * d[1]];
                let peak = [p1[0] + d[0] * cos - d[1] * sin, p1[1] + d[0] * sin + d[1] * cos];
                next.extend_from_slice(&[a, p1, peak, p2]);
            }
            points = next;
        }

        Ok(Self { depth, points })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Vertices of the snowflake, without repeating the first one.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Vertices with the first one appended, for counting as a closed polyline.
    pub fn closed_polyline(&self) -> Vec<[f64; 2]> {
        let mut points = self.points.clone();
        points.extend(self.points.first().copied());
        points
    }
}

/// `count` points drawn uniformly from `region`.
pub fn random_points(region: &BoundingRegion, count: usize) -> Result<Vec<Vec<f64>>> {
    let (min, max) = region.corners()?;
    let mut rng = StdRng::seed_from_u64(get_seed());

    Ok((0..count)
        .map(|_| {
            min.iter()
                .zip(max)
                .map(|(lo, hi)| lo + rng.r#gen::<f64>() * (hi - lo))
                .collect()
        })
        .collect())
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_counts() {
        for depth in 1..=5 {
            let flake = KochSnowflake::construct(depth).unwrap();
            assert_eq!(flake.points().len(), 3 * 4usize.pow(depth - 1));
        }
        assert_eq!(KochSnowflake::construct(0).unwrap_err(), FracdimError::InvalidDepth(0));
    }

    #[test]
    fn test_bumps_point_outward() {
        let flake = KochSnowflake::construct(2).unwrap();
        // The bump on the bottom edge sits below the triangle.
        let peak = flake.points()[2];
        assert!((peak[0] - 0.5).abs() < 1e-12);
        assert!((peak[1] + 3f64.sqrt() / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_polyline() {
        let flake = KochSnowflake::construct(3).unwrap();
        let closed = flake.closed_polyline();
        assert_eq!(closed.len(), flake.points().len() + 1);
        assert_eq!(closed.first(), closed.last());
    }

    #[test]
    fn test_random_points_inside_region() {
        let region = BoundingRegion::from_corners(&[-1.0, 2.0, 0.0], &[1.0, 3.0, 5.0]).unwrap();
        let points = random_points(&region, 500).unwrap();
        assert_eq!(points.len(), 500);
        for p in &points {
            assert_eq!(region.contains_point(p), Ok(true));
        }
    }
}
