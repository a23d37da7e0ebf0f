use tpose_matrix::dense::RowMajorMatrix;
use tracing::instrument;

use crate::error::check_output_shape;
use crate::{TransposeResult, TransposeStrategy};

/// Single-threaded row-major transpose; the reference the other strategies are checked against.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequential;

impl TransposeStrategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn transpose(
        &self,
        input: &RowMajorMatrix,
        output: &mut RowMajorMatrix,
    ) -> TransposeResult<()> {
        transpose(input, output)
    }
}

/// Transpose `input` into `output` on the calling thread.
///
/// Iterates `i` over the rows of `input` and `j` over its columns, writing
/// `output[j][i] = input[i][j]`. Reads are contiguous, writes stride by the
/// input height.
///
/// # Errors
///
/// [`TransposeError::DimensionMismatch`](crate::TransposeError::DimensionMismatch)
/// if `output` is not `input.width() x input.height()`.
#[instrument(skip_all, fields(dims = %input.dimensions()))]
pub fn transpose(input: &RowMajorMatrix, output: &mut RowMajorMatrix) -> TransposeResult<()> {
    check_output_shape(input, output)?;
    let (rows, cols) = (input.height(), input.width());
    let src = input.values();
    let dst = output.values_mut();
    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use tpose_matrix::Dimensions;

    use super::*;
    use crate::TransposeError;

    #[test]
    fn transposes_two_by_three() {
        let input = RowMajorMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let mut output = RowMajorMatrix::zeroed(2, 3);
        transpose(&input, &mut output).unwrap();
        assert_eq!(output.to_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn single_row_becomes_single_column() {
        let input = RowMajorMatrix::from_rows(&[[7, 8, 9, 10]]).unwrap();
        let mut output = RowMajorMatrix::zeroed(1, 4);
        transpose(&input, &mut output).unwrap();
        assert_eq!(output.values(), &[7, 8, 9, 10]);
        assert_eq!(output.dimensions(), Dimensions::new(1, 4));
    }

    #[test]
    fn rejects_untransposed_output_shape() {
        let input = RowMajorMatrix::zeroed(3, 2);
        let mut output = RowMajorMatrix::filled(-1, 3, 2);
        let err = transpose(&input, &mut output).unwrap_err();
        assert!(matches!(
            err,
            TransposeError::DimensionMismatch { expected, actual }
                if expected == Dimensions::new(2, 3) && actual == Dimensions::new(3, 2)
        ));
        assert!(output.values().iter().all(|&v| v == -1));
    }

    #[test]
    fn same_length_wrong_shape_is_rejected() {
        // 6 cells either way, but 1x6 is not the transpose of 2x3.
        let input = RowMajorMatrix::zeroed(3, 2);
        let mut output = RowMajorMatrix::zeroed(6, 1);
        assert!(transpose(&input, &mut output).is_err());
    }

    #[test]
    fn degenerate_shapes_complete_without_writes() {
        for (width, height) in [(0, 0), (0, 4), (4, 0)] {
            let input = RowMajorMatrix::zeroed(width, height);
            let mut output = RowMajorMatrix::zeroed(height, width);
            transpose(&input, &mut output).unwrap();
            assert!(output.values().is_empty());
            assert_eq!(output.dimensions(), Dimensions::new(height, width));
        }
    }
}
