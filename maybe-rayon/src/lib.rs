//! Use rayon when the `parallel` feature is enabled, plain iterators otherwise.
//!
//! Callers import `prelude::*` and write `into_par_iter()` unconditionally;
//! [`install`] runs a closure on a worker pool of a chosen size.

#[cfg(feature = "parallel")]
pub mod prelude {
    pub use rayon::prelude::*;
}

#[cfg(not(feature = "parallel"))]
mod serial;

#[cfg(not(feature = "parallel"))]
pub mod prelude {
    pub use core::iter::{
        ExactSizeIterator as IndexedParallelIterator, Iterator as ParallelIterator,
    };

    pub use super::serial::*;
}

mod pool;

pub use pool::{PoolBuildError, current_num_threads, install};
