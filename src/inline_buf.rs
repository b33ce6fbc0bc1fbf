use alloc::vec::Vec;
use core::{mem::MaybeUninit, ptr, slice};

/// Fixed-capacity storage embedded in its owner.
///
/// This is the inline state of a [`HybridVec`](crate::HybridVec): `N` slots of
/// uninitialized memory plus the number of leading slots that hold values.
/// It never allocates, and it never checks capacity on the fast paths; the
/// owning vector decides when to leave it for the heap.
pub(crate) struct InlineBuf<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> Drop for InlineBuf<T, N> {
    // Slots are `MaybeUninit`, so initialized values are dropped by hand.
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: the first `len` slots are initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const N: usize> InlineBuf<T, N> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            // SAFETY: an array of `MaybeUninit` needs no initialization.
            data: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Writes `value` after the last element.
    ///
    /// # Safety
    /// `len < N`.
    #[inline]
    pub(crate) unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < N);
        unsafe { ptr::write(self.as_mut_ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Shifts `[index, len)` one slot up and writes `value` at `index`.
    ///
    /// # Safety
    /// `index <= len < N`.
    #[inline]
    pub(crate) unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index <= self.len && self.len < N);
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialized and is now outside the live range.
        Some(unsafe { ptr::read(self.as_ptr().add(self.len)) })
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY: `[len, len + tail)` was initialized and is no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), tail));
        }
    }

    /// Moves every element to the end of `dst`, leaving `self` empty.
    ///
    /// `dst` must already have room for them; the buffer never reallocates it.
    pub(crate) fn move_into(&mut self, dst: &mut Vec<T>) {
        let len = self.len;
        let dst_len = dst.len();
        assert!(dst.capacity() - dst_len >= len, "destination has no room for inline elements");

        // SAFETY: capacity checked above; ownership of the values passes to `dst`
        // because `self.len` is reset before anyone can observe the copies.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), dst.as_mut_ptr().add(dst_len), len);
            self.len = 0;
            dst.set_len(dst_len + len);
        }
    }
}

impl<T: Clone, const N: usize> InlineBuf<T, N> {
    /// Clones `src` into a fresh buffer.
    ///
    /// # Panics
    /// Panics if `src.len() >= N`; the owning vector always keeps one slot free.
    pub(crate) fn from_slice(src: &[T]) -> Self {
        assert!(src.len() < N, "inline buffer needs a free slot");
        let mut buf = Self::new();
        for item in src {
            // SAFETY: `buf.len <= src.len() < N`.
            unsafe { buf.push_unchecked(item.clone()) };
        }
        buf
    }
}
