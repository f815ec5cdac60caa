//! Error types for the shape-eval library.

use thiserror::Error;

/// Result type for shape-eval operations.
pub type Result<T> = std::result::Result<T, ShapeEvalError>;

/// Error types that can occur while loading and scoring annotations.
#[derive(Error, Debug)]
pub enum ShapeEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error while decoding or encoding an image.
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// A bounding box is not a finite rectangle with `x1 < x2` and `y1 < y2`.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// IoU threshold outside [0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Configuration names no categories to evaluate.
    #[error("Empty config: {0}")]
    EmptyConfig(String),
}
