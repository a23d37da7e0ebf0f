use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use rand::Rng;

use crate::{Dimensions, MatrixError, MatrixResult};

/// A dense `i32` matrix stored in row-major form.
///
/// Element `(r, c)` lives at `values[r * width + c]`. The height is stored
/// alongside the width so that `n x 0` matrices keep their row count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowMajorMatrix {
    values: Vec<i32>,
    width: usize,
    height: usize,
}

fn checked_len(width: usize, height: usize) -> usize {
    width
        .checked_mul(height)
        .unwrap_or_else(|| panic!("a {height}x{width} matrix has more than usize::MAX elements"))
}

impl RowMajorMatrix {
    /// Wrap `values` as a `height x width` matrix.
    pub fn new(values: Vec<i32>, width: usize, height: usize) -> MatrixResult<Self> {
        if width.checked_mul(height) != Some(values.len()) {
            return Err(MatrixError::LengthMismatch {
                len: values.len(),
                width,
                height,
            });
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self::filled(0, width, height)
    }

    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    #[must_use]
    pub fn filled(value: i32, width: usize, height: usize) -> Self {
        Self {
            values: vec![value; checked_len(width, height)],
            width,
            height,
        }
    }

    /// Flatten nested rows into a single buffer.
    ///
    /// The width is taken from the first row; an empty slice gives a `0x0` matrix.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> MatrixResult<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut values = Vec::with_capacity(width * rows.len());
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MatrixError::RaggedRows {
                    row: r,
                    expected: width,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            values,
            width,
            height: rows.len(),
        })
    }

    /// A matrix of uniformly random values.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn rand<R: Rng>(rng: &mut R, width: usize, height: usize) -> Self {
        let values = (0..checked_len(width, height)).map(|_| rng.random()).collect();
        Self {
            values,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// All values, in row-major order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Mutable access to the backing buffer. The shape cannot change through it.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }

    #[inline]
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> Option<i32> {
        (r < self.height && c < self.width).then(|| self.values[r * self.width + c])
    }

    #[must_use]
    pub fn row(&self, r: usize) -> Option<&[i32]> {
        (r < self.height).then(|| &self.values[r * self.width..(r + 1) * self.width])
    }

    pub fn row_mut(&mut self, r: usize) -> Option<&mut [i32]> {
        if r >= self.height {
            return None;
        }
        Some(&mut self.values[r * self.width..(r + 1) * self.width])
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        (0..self.height).map(move |r| &self.values[r * self.width..(r + 1) * self.width])
    }

    /// Copy out into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.rows().map(<[i32]>::to_vec).collect()
    }
}

impl Index<(usize, usize)> for RowMajorMatrix {
    type Output = i32;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &i32 {
        assert!(
            r < self.height && c < self.width,
            "index ({r}, {c}) out of bounds for {} matrix",
            self.dimensions()
        );
        &self.values[r * self.width + c]
    }
}

impl IndexMut<(usize, usize)> for RowMajorMatrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut i32 {
        assert!(
            r < self.height && c < self.width,
            "index ({r}, {c}) out of bounds for {} matrix",
            self.dimensions()
        );
        &mut self.values[r * self.width + c]
    }
}
