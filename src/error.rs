//! Error types for city generation.

use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityError {
    /// A coordinate access outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// The map cannot hold a road seed inside its margin.
    #[error("map {width}x{height} is too small for a seed margin of {margin}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        margin: usize,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid building catalog: {0}")]
    Catalog(#[from] WeightedError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
