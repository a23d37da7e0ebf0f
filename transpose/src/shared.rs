use core::marker::PhantomData;
use core::sync::atomic::{AtomicPtr, Ordering};

/// Write-only handle to an output buffer shared by all workers of one call.
///
/// The pointer is kept in an `AtomicPtr` so the handle is `Sync`; it is only
/// ever loaded, never swapped. Exclusive access to the buffer is borrowed for
/// `'a`, so no safe code can observe it while workers are writing.
pub(crate) struct SharedOutput<'a> {
    ptr: AtomicPtr<i32>,
    len: usize,
    _buffer: PhantomData<&'a mut [i32]>,
}

impl<'a> SharedOutput<'a> {
    /// Wrap the storage of a `rows x cols` output.
    ///
    /// # Panics
    ///
    /// Panics unless `buffer` holds exactly `rows * cols` values.
    pub(crate) fn new(buffer: &'a mut [i32], rows: usize, cols: usize) -> Self {
        assert!(
            rows.checked_mul(cols) == Some(buffer.len()),
            "output storage holds {} values, which does not fit {rows}x{cols}",
            buffer.len()
        );
        Self {
            len: buffer.len(),
            ptr: AtomicPtr::new(buffer.as_mut_ptr()),
            _buffer: PhantomData,
        }
    }

    /// Store `value` at `idx`.
    ///
    /// # Safety
    ///
    /// `idx < len`, and no other worker writes `idx` while this handle is alive.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, idx: usize, value: i32) {
        debug_assert!(idx < self.len, "write at {idx} past end {}", self.len);
        unsafe {
            self.ptr.load(Ordering::Relaxed).add(idx).write(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn writes_land_in_buffer() {
        let mut buffer = vec![0; 6];
        let out = SharedOutput::new(&mut buffer, 2, 3);
        unsafe {
            out.write(0, 4);
            out.write(5, 9);
        }
        assert_eq!(buffer, [4, 0, 0, 0, 0, 9]);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn short_buffer_is_refused() {
        let mut buffer = vec![0; 4];
        let _out = SharedOutput::new(&mut buffer, 2, 3);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn wrapping_shape_is_refused() {
        // 20 * (usize::MAX / 20 + 1) wraps to a small product.
        let mut buffer = vec![0; 4];
        let _out = SharedOutput::new(&mut buffer, 20, usize::MAX / 20 + 1);
    }
}
