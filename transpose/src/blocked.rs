use core::num::NonZeroUsize;
use core::ops::Range;

use tpose_matrix::dense::RowMajorMatrix;
use tpose_maybe_rayon::{current_num_threads, install};
use tpose_maybe_rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::check_output_shape;
use crate::shared::SharedOutput;
use crate::{TransposeError, TransposeResult, TransposeStrategy};

/// Tile side used when none is given.
///
/// A 32x32 tile of `i32` is 4 KiB per side of the copy, so the rows being
/// read and the rows being written both stay resident in L1.
pub const DEFAULT_BLOCK_SIZE: usize = 32;

/// Cache-blocked parallel transpose.
///
/// Tiles, not elements, are the unit of work: each worker copies a whole
/// `block_size x block_size` tile before taking another, reusing the cache
/// lines it brought in for that tile's rows and columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockedParallel {
    block_size: NonZeroUsize,
    num_threads: Option<NonZeroUsize>,
}

impl BlockedParallel {
    /// # Errors
    ///
    /// [`TransposeError::ZeroBlockSize`] if `block_size == 0`.
    pub fn new(block_size: usize) -> TransposeResult<Self> {
        let block_size = NonZeroUsize::new(block_size).ok_or(TransposeError::ZeroBlockSize)?;
        Ok(Self {
            block_size,
            num_threads: None,
        })
    }

    /// Run on a dedicated pool of `num_threads` workers, started and torn down per call.
    #[must_use]
    pub const fn with_threads(mut self, num_threads: NonZeroUsize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    #[must_use]
    pub const fn block_size(&self) -> usize {
        self.block_size.get()
    }

    #[must_use]
    pub const fn num_threads(&self) -> Option<NonZeroUsize> {
        self.num_threads
    }
}

impl Default for BlockedParallel {
    fn default() -> Self {
        Self {
            block_size: NonZeroUsize::MIN.saturating_add(DEFAULT_BLOCK_SIZE - 1),
            num_threads: None,
        }
    }
}

impl TransposeStrategy for BlockedParallel {
    fn name(&self) -> &'static str {
        "blocked-parallel"
    }

    fn transpose(
        &self,
        input: &RowMajorMatrix,
        output: &mut RowMajorMatrix,
    ) -> TransposeResult<()> {
        par_blocked_transpose(input, output, self.block_size(), self.num_threads)
    }
}

/// Transpose `input` into `output` one square tile at a time, tiles spread across workers.
///
/// Tiles start at `(i, j)` for `i` stepping by `block_size` over the rows
/// and `j` stepping by `block_size` over the columns. The two tile loops are
/// collapsed and run in parallel; the two loops inside a tile run
/// sequentially on the worker that owns it. Edge tiles are clipped to the
/// matrix, so `block_size` need not divide either dimension.
///
/// # Errors
///
/// [`TransposeError::ZeroBlockSize`] if `block_size == 0`,
/// [`TransposeError::DimensionMismatch`] if `output` is not
/// `input.width() x input.height()`, or [`TransposeError::WorkerPool`] if the
/// dedicated pool cannot be started.
#[instrument(
    skip_all,
    fields(dims = %input.dimensions(), block_size = block_size, threads = ?num_threads)
)]
pub fn par_blocked_transpose(
    input: &RowMajorMatrix,
    output: &mut RowMajorMatrix,
    block_size: usize,
    num_threads: Option<NonZeroUsize>,
) -> TransposeResult<()> {
    let block_size = NonZeroUsize::new(block_size).ok_or(TransposeError::ZeroBlockSize)?;
    check_output_shape(input, output)?;

    let (rows, cols) = (input.height(), input.width());
    let grid = TileGrid::new(rows, cols, block_size);
    if grid.is_empty() {
        return Ok(());
    }

    let src = input.values();
    let dst = SharedOutput::new(output.values_mut(), cols, rows);

    install(num_threads, || {
        debug!(workers = current_num_threads(), "worker pool started");
        (0..grid.len()).into_par_iter().for_each(|t| {
            let Tile { rows: tile_rows, cols: tile_cols } = grid.tile(t);
            for bi in tile_rows {
                for bj in tile_cols.clone() {
                    // SAFETY: tiles partition the index space and `(bi, bj) -> (bj, bi)`
                    // is a bijection, so every output cell has exactly one writer.
                    unsafe { dst.write(bj * rows + bi, src[bi * cols + bj]) };
                }
            }
        });
    })?;
    Ok(())
}

/// A tile of the iteration space: input rows `rows`, input columns `cols`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

/// Partition of a `rows x cols` index space into square tiles of side `block_size`.
///
/// Tiles are numbered row of tiles first: tile `t` sits in tile row
/// `t / tile_cols` and tile column `t % tile_cols`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    block_size: usize,
    tile_rows: usize,
    tile_cols: usize,
}

impl TileGrid {
    #[must_use]
    pub const fn new(rows: usize, cols: usize, block_size: NonZeroUsize) -> Self {
        let block_size = block_size.get();
        Self {
            rows,
            cols,
            block_size,
            tile_rows: rows.div_ceil(block_size),
            tile_cols: cols.div_ceil(block_size),
        }
    }

    /// Number of tiles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tile_rows * self.tile_cols
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `t`-th tile, clipped to the matrix boundary.
    ///
    /// # Panics
    ///
    /// Panics if `t >= self.len()`.
    #[must_use]
    pub fn tile(&self, t: usize) -> Tile {
        assert!(t < self.len(), "tile {t} out of range for {} tiles", self.len());
        let i = (t / self.tile_cols) * self.block_size;
        let j = (t % self.tile_cols) * self.block_size;
        Tile {
            rows: i..(i + self.block_size).min(self.rows),
            cols: j..(j + self.block_size).min(self.cols),
        }
    }

    pub fn tiles(&self) -> impl ExactSizeIterator<Item = Tile> + '_ {
        (0..self.len()).map(|t| self.tile(t))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::transpose;

    fn grid(rows: usize, cols: usize, block_size: usize) -> TileGrid {
        TileGrid::new(rows, cols, NonZeroUsize::new(block_size).unwrap())
    }

    #[test]
    fn transposes_two_by_three() {
        let input = RowMajorMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        for block_size in [1, 2, 3, 32] {
            let mut output = RowMajorMatrix::zeroed(2, 3);
            par_blocked_transpose(&input, &mut output, block_size, None).unwrap();
            assert_eq!(output.to_rows(), vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        }
    }

    #[test]
    fn five_by_three_with_block_four_writes_every_cell() {
        let input = RowMajorMatrix::new((1..=15).collect(), 3, 5).unwrap();
        let mut expected = RowMajorMatrix::zeroed(5, 3);
        transpose(&input, &mut expected).unwrap();

        // No input value equals the sentinel, so any cell left untouched shows up.
        let mut output = RowMajorMatrix::filled(i32::MIN, 5, 3);
        par_blocked_transpose(&input, &mut output, 4, NonZeroUsize::new(2)).unwrap();
        assert!(output.values().iter().all(|&v| v != i32::MIN));
        assert_eq!(output, expected);
    }

    #[test]
    fn edge_tiles_are_clipped() {
        let g = grid(5, 3, 4);
        assert_eq!(g.len(), 2);
        assert_eq!(g.tile(0), Tile { rows: 0..4, cols: 0..3 });
        assert_eq!(g.tile(1), Tile { rows: 4..5, cols: 0..3 });
    }

    #[test]
    fn tiles_cover_each_cell_exactly_once() {
        for (rows, cols, block_size) in [(5, 3, 4), (7, 7, 7), (1, 9, 2), (33, 65, 32), (4, 4, 9)] {
            let g = grid(rows, cols, block_size);
            let mut hits = vec![0_u32; rows * cols];
            for tile in g.tiles() {
                assert!(tile.rows.end <= rows && tile.cols.end <= cols);
                assert!(!tile.rows.is_empty() && !tile.cols.is_empty());
                for i in tile.rows {
                    for j in tile.cols.clone() {
                        hits[i * cols + j] += 1;
                    }
                }
            }
            assert!(hits.iter().all(|&h| h == 1), "{rows}x{cols} / {block_size}");
        }
    }

    #[test]
    fn oversized_block_is_a_single_tile() {
        let g = grid(6, 4, 100);
        let tiles: Vec<_> = g.tiles().collect();
        assert_eq!(tiles, vec![Tile { rows: 0..6, cols: 0..4 }]);
    }

    #[test]
    fn empty_index_space_has_no_tiles() {
        assert!(grid(0, 8, 4).is_empty());
        assert!(grid(8, 0, 4).is_empty());
        assert_eq!(grid(0, 8, 4).tiles().count(), 0);
    }

    #[test]
    fn degenerate_shapes_complete_without_writes() {
        for (width, height) in [(0, 0), (0, 3), (3, 0)] {
            let input = RowMajorMatrix::zeroed(width, height);
            let mut output = RowMajorMatrix::zeroed(height, width);
            par_blocked_transpose(&input, &mut output, 4, None).unwrap();
            assert!(output.values().is_empty());
        }
    }

    #[test]
    fn zero_block_size_is_rejected_before_writing() {
        let input = RowMajorMatrix::filled(5, 2, 2);
        let mut output = RowMajorMatrix::zeroed(2, 2);
        let err = par_blocked_transpose(&input, &mut output, 0, None).unwrap_err();
        assert!(matches!(err, TransposeError::ZeroBlockSize));
        assert!(output.values().iter().all(|&v| v == 0));
        assert!(matches!(BlockedParallel::new(0), Err(TransposeError::ZeroBlockSize)));
    }

    #[test]
    fn default_uses_default_block_size() {
        let strategy = BlockedParallel::default();
        assert_eq!(strategy.block_size(), DEFAULT_BLOCK_SIZE);
        assert_eq!(strategy.num_threads(), None);
    }
}
