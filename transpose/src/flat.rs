use core::num::NonZeroUsize;

use tpose_matrix::dense::RowMajorMatrix;
use tpose_maybe_rayon::{current_num_threads, install};
use tpose_maybe_rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::check_output_shape;
use crate::shared::SharedOutput;
use crate::{TransposeResult, TransposeStrategy};

/// Element-granular parallel transpose with no blocking.
///
/// This is the naive parallel baseline: the unit of work handed to a worker
/// is a single element, so consecutive writes of one worker land in
/// different cache lines of the output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatParallel {
    num_threads: Option<NonZeroUsize>,
}

impl FlatParallel {
    /// Run on a per-call pool of rayon's default size.
    #[must_use]
    pub const fn new() -> Self {
        Self { num_threads: None }
    }

    /// Run on a dedicated pool of `num_threads` workers, started and torn down per call.
    #[must_use]
    pub const fn with_threads(mut self, num_threads: NonZeroUsize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    #[must_use]
    pub const fn num_threads(&self) -> Option<NonZeroUsize> {
        self.num_threads
    }
}

impl TransposeStrategy for FlatParallel {
    fn name(&self) -> &'static str {
        "flat-parallel"
    }

    fn transpose(
        &self,
        input: &RowMajorMatrix,
        output: &mut RowMajorMatrix,
    ) -> TransposeResult<()> {
        par_transpose(input, output, self.num_threads)
    }
}

/// Transpose `input` into `output`, distributing single elements across workers.
///
/// The row and column loops are collapsed into one index space
/// `k in 0..rows * cols` with `i = k / cols` and `j = k % cols`. Iterations
/// run in no particular order; each reads `input[i][j]` and writes
/// `output[j][i]`, so the set of reads and writes is exactly that of
/// [`transpose`](crate::transpose).
///
/// Each call runs on its own pool of `num_threads` workers, or rayon's default
/// count when `None`.
///
/// # Errors
///
/// [`TransposeError::DimensionMismatch`](crate::TransposeError::DimensionMismatch)
/// if `output` is not `input.width() x input.height()`, or
/// [`TransposeError::WorkerPool`](crate::TransposeError::WorkerPool) if the
/// dedicated pool cannot be started.
#[instrument(skip_all, fields(dims = %input.dimensions(), threads = ?num_threads))]
pub fn par_transpose(
    input: &RowMajorMatrix,
    output: &mut RowMajorMatrix,
    num_threads: Option<NonZeroUsize>,
) -> TransposeResult<()> {
    check_output_shape(input, output)?;
    if input.dimensions().is_empty() {
        return Ok(());
    }

    let (rows, cols) = (input.height(), input.width());
    let src = input.values();
    let dst = SharedOutput::new(output.values_mut(), cols, rows);

    install(num_threads, || {
        debug!(workers = current_num_threads(), "worker pool started");
        (0..rows * cols).into_par_iter().for_each(|k| {
            let (i, j) = (k / cols, k % cols);
            // SAFETY: `k -> j * rows + i` is a bijection onto `0..rows * cols`,
            // so every output cell is written by exactly one iteration.
            unsafe { dst.write(j * rows + i, src[k]) };
        });
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::transpose;

    #[test]
    fn transposes_two_by_three() {
        let input = RowMajorMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let mut output = RowMajorMatrix::zeroed(2, 3);
        par_transpose(&input, &mut output, None).unwrap();
        assert_eq!(output.to_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
    }

    #[test]
    fn matches_sequential_on_tall_matrix() {
        let input = RowMajorMatrix::new((0..97 * 13).collect(), 13, 97).unwrap();
        let mut expected = RowMajorMatrix::zeroed(97, 13);
        transpose(&input, &mut expected).unwrap();

        let mut output = RowMajorMatrix::zeroed(97, 13);
        par_transpose(&input, &mut output, NonZeroUsize::new(4)).unwrap();
        assert_eq!(output, expected);
    }

    #[test]
    fn degenerate_shapes_complete_without_writes() {
        for (width, height) in [(0, 0), (0, 5), (5, 0)] {
            let input = RowMajorMatrix::zeroed(width, height);
            let mut output = RowMajorMatrix::zeroed(height, width);
            par_transpose(&input, &mut output, NonZeroUsize::new(2)).unwrap();
            assert!(output.values().is_empty());
        }
    }

    #[test]
    fn strategy_carries_thread_count() {
        let threads = NonZeroUsize::new(3).unwrap();
        let strategy = FlatParallel::new().with_threads(threads);
        assert_eq!(strategy.num_threads(), Some(threads));
        assert_eq!(FlatParallel::default().num_threads(), None);
    }
}
