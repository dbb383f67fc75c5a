//! # fracdim
//!
//! `fracdim` estimates the box-counting (fractal) dimension of point sets in n-dimensional
//! space. It is designed to be used in Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Any dimension**: Regions and grids are sized at runtime, from 1-D signals to
//!   delay-embedded point clouds in many dimensions.
//! - **Two counting modes**: Count the cells containing the points themselves, or every cell
//!   that the polyline through consecutive points passes.
//! - **Resolution sweeps**: Count at a geometric sequence of resolutions in parallel and fit
//!   `ln(count)` against `ln(1 / cell_size)`.
//! - **WASM-first**: Built with `wasm-bindgen` for use from JavaScript and TypeScript.
//!
//! ## Example
//!
//! ```rust
//! use fracdim::{BoundingRegion, CountingMode, GridOccupancyCounter};
//!
//! let region = BoundingRegion::from_corners(&[0.0, 0.0], &[10.0, 10.0])?;
//! let mut counter = GridOccupancyCounter::configure(region, 10, CountingMode::Lines)?;
//!
//! let count = counter.calculate(&[[0.1, 0.1], [9.9, 0.9]])?;
//! assert_eq!(count, 10);
//! # Ok::<(), fracdim::FracdimError>(())
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`GridOccupancyCounter`], bound to a [`BoundingRegion`].
//! [`estimate_dimension`] runs a whole resolution sweep.

mod bounds;
mod counter;
pub mod crossing;
mod dimension;
mod embedding;
mod error;
pub mod generator;
mod grid;
pub mod wasm;

pub use bounds::BoundingRegion;
pub use counter::CountingMode;
pub use counter::GridOccupancyCounter;
pub use counter::MAX_OCCUPANCY_CELLS;
pub use dimension::box_counts;
pub use dimension::estimate_dimension;
pub use dimension::fit_dimension;
pub use dimension::BoxCount;
pub use dimension::DimensionEstimate;
pub use dimension::EstimatorConfig;
pub use embedding::row_to_points;
pub use error::FracdimError;
pub use error::Result;
pub use grid::GridGeometry;
