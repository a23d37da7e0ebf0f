use tpose_matrix::dense::RowMajorMatrix;

use crate::{BlockedParallel, FlatParallel, Sequential, TransposeResult};

/// A way of executing the transpose contract.
///
/// Implementations must write `output[j][i] = input[i][j]` for every cell of
/// an `n x m` input into an `m x n` output, and reject any other output shape
/// without writing.
pub trait TransposeStrategy {
    /// Short kebab-case name, used in logs and reports.
    fn name(&self) -> &'static str;

    fn transpose(&self, input: &RowMajorMatrix, output: &mut RowMajorMatrix) -> TransposeResult<()>;

    /// Allocate a correctly shaped output and transpose into it.
    fn transpose_to_new(&self, input: &RowMajorMatrix) -> TransposeResult<RowMajorMatrix> {
        let dims = input.dimensions().transposed();
        let mut output = RowMajorMatrix::zeroed(dims.width, dims.height);
        self.transpose(input, &mut output)?;
        Ok(output)
    }
}

/// Runtime choice between the three strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    Sequential(Sequential),
    FlatParallel(FlatParallel),
    BlockedParallel(BlockedParallel),
}

impl From<Sequential> for Strategy {
    fn from(strategy: Sequential) -> Self {
        Self::Sequential(strategy)
    }
}

impl From<FlatParallel> for Strategy {
    fn from(strategy: FlatParallel) -> Self {
        Self::FlatParallel(strategy)
    }
}

impl From<BlockedParallel> for Strategy {
    fn from(strategy: BlockedParallel) -> Self {
        Self::BlockedParallel(strategy)
    }
}

impl TransposeStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Self::Sequential(inner) => inner.name(),
            Self::FlatParallel(inner) => inner.name(),
            Self::BlockedParallel(inner) => inner.name(),
        }
    }

    fn transpose(
        &self,
        input: &RowMajorMatrix,
        output: &mut RowMajorMatrix,
    ) -> TransposeResult<()> {
        match self {
            Self::Sequential(inner) => inner.transpose(input, output),
            Self::FlatParallel(inner) => inner.transpose(input, output),
            Self::BlockedParallel(inner) => inner.transpose(input, output),
        }
    }
}
