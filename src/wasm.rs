use crate::bounds::BoundingRegion;
use crate::counter::GridOccupancyCounter;
use crate::dimension::{self, EstimatorConfig};
use crate::error::FracdimError;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initThreads)]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_COUNTING_MODE: &'static str = r#"
export type CountingMode = "points" | "lines";
"#;

fn to_js(err: FracdimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM wrapper for the grid occupancy counter.
///
/// Points are passed as a flat array, `dim` consecutive coordinates per point.
#[wasm_bindgen(js_name = BlocksCounter)]
pub struct BlocksCounterWASM {
    inner: GridOccupancyCounter,
}

#[wasm_bindgen(js_class = BlocksCounter)]
impl BlocksCounterWASM {
    #[wasm_bindgen(constructor)]
    pub fn new(min: &[f64], max: &[f64], cells_per_axis: usize, mode: &str) -> Result<BlocksCounterWASM, JsValue> {
        let region = BoundingRegion::from_corners(min, max).map_err(to_js)?;
        let mode = mode.parse().map_err(to_js)?;
        let inner = GridOccupancyCounter::configure(region, cells_per_axis, mode).map_err(to_js)?;
        Ok(BlocksCounterWASM { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn dim(&self) -> usize {
        self.inner.region().map_or(0, BoundingRegion::dim)
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[wasm_bindgen(getter, js_name = cellsPerAxis)]
    pub fn cells_per_axis(&self) -> usize {
        self.inner.cells_per_axis().unwrap_or(0)
    }

    #[wasm_bindgen(js_name = setCellsPerAxis)]
    pub fn set_cells_per_axis(&mut self, cells_per_axis: usize) -> Result<(), JsValue> {
        self.inner.set_cells_per_axis(cells_per_axis).map_err(to_js)
    }

    pub fn calculate(&mut self, points: &[f64]) -> Result<usize, JsValue> {
        let points = split_points(points, self.dim()).map_err(to_js)?;
        self.inner.calculate(&points).map_err(to_js)
    }
}

/// Box-counting dimension of a flat point array over the default resolution sweep.
#[wasm_bindgen(js_name = estimateDimension)]
pub fn estimate_dimension(min: &[f64], max: &[f64], points: &[f64], mode: &str) -> Result<f64, JsValue> {
    let region = BoundingRegion::from_corners(min, max).map_err(to_js)?;
    let config = EstimatorConfig {
        mode: mode.parse().map_err(to_js)?,
        ..Default::default()
    };
    let points = split_points(points, region.dim()).map_err(to_js)?;
    dimension::estimate_dimension(&region, &points, &config)
        .map(|e| e.dimension)
        .map_err(to_js)
}

fn split_points(flat: &[f64], dim: usize) -> Result<Vec<&[f64]>, FracdimError> {
    if dim == 0 || flat.len() % dim != 0 {
        return Err(FracdimError::DimensionMismatch {
            expected: dim,
            actual: flat.len(),
        });
    }
    Ok(flat.chunks_exact(dim).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_points() {
        let flat = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let points = split_points(&flat, 3).unwrap();
        assert_eq!(points, vec![&[0.0, 1.0, 2.0][..], &[3.0, 4.0, 5.0][..]]);
        assert!(split_points(&flat, 4).is_err());
    }
}
