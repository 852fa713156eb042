//! Error types for point-set operations
//!
//! Every check here runs before any arithmetic, so a failed call never
//! leaves a partially computed result behind.

use thiserror::Error;

/// Errors that can occur when validating or transforming point sets
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Two sizes that must agree do not (point counts, weight lengths, ...)
    #[error("Shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An index subset references a point outside `[0, len)`
    #[error("Index {index} is out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// An index subset lists the same point twice
    #[error("Index {0} appears more than once in the selection")]
    DuplicateIndex(usize),

    /// The operation needs at least one point
    #[error("Point set is empty")]
    EmptyPointSet,

    /// Weights are negative, non-finite, or sum to zero
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Box lengths or angles cannot describe a periodic cell
    #[error("Invalid periodic box: {0}")]
    InvalidBox(String),
}

impl GeomError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        GeomError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Result type for point-set operations
pub type GeomResult<T> = Result<T, GeomError>;
