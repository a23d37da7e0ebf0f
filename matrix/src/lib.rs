//! Dense integer matrices.

#![no_std]

extern crate alloc;

pub mod dense;
mod error;

use core::fmt::{Debug, Display, Formatter};

pub use error::*;

/// The shape of a matrix: `height` rows of `width` columns.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// The shape of this matrix's transpose.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Number of elements.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub const fn len(self) -> usize {
        match self.width.checked_mul(self.height) {
            Some(len) => len,
            None => panic!("matrix element count overflows usize"),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Debug for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
