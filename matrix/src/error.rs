//! Errors raised while building a matrix.

use thiserror::Error;

/// Storage handed to a matrix constructor does not describe a rectangle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Flat storage length is not `width * height`.
    #[error("storage holds {len} values, which does not fit a {height}x{width} matrix")]
    LengthMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    /// Nested rows passed to `from_rows` do not all have the same length.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for matrix construction.
pub type MatrixResult<T> = core::result::Result<T, MatrixError>;
