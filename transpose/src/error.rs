//! Errors reported by the transpose strategies.

use thiserror::Error;
use tpose_matrix::Dimensions;
use tpose_matrix::dense::RowMajorMatrix;
use tpose_maybe_rayon::PoolBuildError;

/// Reasons a transpose call refuses to run.
///
/// Every check happens before the first write, so on error the output
/// buffer is left untouched.
#[derive(Debug, Error)]
pub enum TransposeError {
    /// The output buffer is not shaped like the transpose of the input.
    #[error("output buffer is {actual}, expected {expected}")]
    DimensionMismatch {
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("block size must be at least 1")]
    ZeroBlockSize,

    /// A dedicated worker pool of the requested size could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] PoolBuildError),
}

/// Result type alias for transpose operations.
pub type TransposeResult<T> = core::result::Result<T, TransposeError>;

/// Check that `output` has the swapped shape of `input`.
pub(crate) fn check_output_shape(
    input: &RowMajorMatrix,
    output: &RowMajorMatrix,
) -> TransposeResult<()> {
    let expected = input.dimensions().transposed();
    let actual = output.dimensions();
    if expected != actual {
        return Err(TransposeError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
