//! Error types for threshclust-core.

use thiserror::Error;

/// Result type alias for threshclust operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for threshclust operations.
///
/// Every variant is a caller contract violation detected at entry; nothing
/// here is raised from inside a clustering pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The point set has no points.
    #[error("point set is empty")]
    EmptyPointSet,

    /// A point does not share the dimension of the first point.
    #[error("point {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate in dimension {dim}")]
    NonFiniteCoordinate { index: usize, dim: usize },

    /// Flat coordinate buffer cannot be split into points.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Threshold is negative or not finite.
    #[error("invalid threshold: {0} (must be finite and non-negative)")]
    InvalidThreshold(f64),

    /// Points and labels disagree in length.
    #[error("length mismatch: {points} points, {labels} labels")]
    LengthMismatch { points: usize, labels: usize },

    /// Unrecognized traversal order string.
    #[error("invalid traversal order: {0}")]
    InvalidOrder(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
