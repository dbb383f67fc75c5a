//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FracdimError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FracdimError {
    #[error("invalid corner shape: expected {expected} coordinates, got {actual}")]
    InvalidCornerShape { expected: usize, actual: usize },

    #[error("invalid counting mode '{0}', expected \"points\" or \"lines\"")]
    InvalidMode(String),

    #[error("invalid point dimension: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("bounding region corners are not set")]
    RegionUnset,

    #[error("bounding region has zero extent along axis {axis}")]
    DegenerateRegion { axis: usize },

    #[error("invalid resolution {0}, at least one cell per axis is required")]
    InvalidResolution(usize),

    #[error("grid of {cells_per_axis}^{dim} cells does not fit in memory")]
    GridTooLarge { cells_per_axis: usize, dim: usize },

    #[error("counter has no region or resolution configured")]
    GridUnconfigured,

    #[error("point {point} lies outside the region along axis {axis} (value {value})")]
    PointOutsideRegion { point: usize, axis: usize, value: f64 },

    #[error("row of length {len} is too short for {dimension}-dimensional embedding")]
    EmbeddingTooShort { len: usize, dimension: usize },

    #[error("need at least {needed} box counts to fit a dimension, got {got}")]
    InsufficientSamples { needed: usize, got: usize },

    #[error("invalid fractal depth {0}, depth starts at 1")]
    InvalidDepth(u32),
}
