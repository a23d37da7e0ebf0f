//! Out-of-place transposition of dense integer matrices.
//!
//! Three interchangeable strategies implement the same contract: given an
//! `n x m` input and an `m x n` output, write `output[j][i] = input[i][j]`
//! for every cell.
//!
//! - [`Sequential`]: a single-threaded row-major double loop, used as the
//!   reference for the other two.
//! - [`FlatParallel`]: the double loop collapsed into one index space whose
//!   iterations are spread over worker threads, with no blocking.
//! - [`BlockedParallel`]: the index space cut into square tiles of side
//!   `block_size`; tiles are spread over worker threads and each tile is
//!   transposed in full by the worker that owns it.
//!
//! All three produce identical output for the same input.
//!
//! ```
//! use tpose_matrix::dense::RowMajorMatrix;
//! use tpose_transpose::{BlockedParallel, TransposeStrategy};
//!
//! let input = RowMajorMatrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
//! let output = BlockedParallel::new(2).unwrap().transpose_to_new(&input).unwrap();
//!
//! assert_eq!(output.to_rows(), [[1, 4], [2, 5], [3, 6]]);
//! ```

#![no_std]

extern crate alloc;

mod blocked;
mod error;
mod flat;
mod sequential;
mod shared;
mod strategy;

pub use blocked::*;
pub use error::*;
pub use flat::*;
pub use sequential::*;
pub use strategy::*;
