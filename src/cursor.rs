//! Random-access positions over a contiguous run of elements.
//!
//! A [`Cursor`] borrows the slice it walks, so the borrow checker rejects any
//! use after the owning [`HybridVec`](crate::HybridVec) grows or is dropped.
//! Moving a cursor is never checked; reading through it is.

use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Index, Sub, SubAssign},
    ptr,
};

/// A position inside a borrowed run of elements.
///
/// Valid read positions are `0..len`. The positions `-1` (before the first
/// element) and `len` (one past the last) are reachable and comparable, which
/// is what [`rend`](crate::HybridVec::rend) and [`end`](crate::HybridVec::end)
/// return. A default cursor points into an empty run and never yields a value.
///
/// Runs are told apart by address and length. Every heap run of a zero-sized
/// `T` starts at the same dangling address, so cursors over two such runs of
/// equal length compare as if they shared a run.
///
/// # Examples
///
/// ```
/// # use hybridvec::{HybridVec, hybridvec};
/// let vec: HybridVec<i32, 8> = hybridvec![10, 20, 30];
///
/// let mut cursor = vec.begin();
/// assert_eq!(cursor.get(), Some(&10));
///
/// cursor += 2;
/// assert_eq!(*cursor, 30);
/// assert_eq!(cursor.at(-1), Some(&20));
///
/// cursor.step_forward();
/// assert_eq!(cursor, vec.end());
/// assert_eq!(cursor.get(), None);
/// ```
pub struct Cursor<'a, T> {
    run: &'a [T],
    pos: isize,
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Default for Cursor<'_, T> {
    #[inline]
    fn default() -> Self {
        Self { run: &[], pos: 0 }
    }
}

impl<'a, T> Cursor<'a, T> {
    /// Creates a cursor at the first element of `run`.
    #[inline]
    pub const fn new(run: &'a [T]) -> Self {
        Self { run, pos: 0 }
    }

    /// Creates a cursor one past the last element of `run`.
    #[inline]
    pub const fn at_end(run: &'a [T]) -> Self {
        Self {
            run,
            pos: run.len() as isize,
        }
    }

    /// Returns the signed position relative to the start of the run.
    #[inline]
    pub const fn position(&self) -> isize {
        self.pos
    }

    /// Moves the cursor `n` elements forward.
    #[inline]
    pub const fn advance(&mut self, n: usize) -> &mut Self {
        self.pos = self.pos.wrapping_add_unsigned(n);
        self
    }

    /// Moves the cursor `n` elements back.
    #[inline]
    pub const fn retreat(&mut self, n: usize) -> &mut Self {
        self.pos = self.pos.wrapping_sub_unsigned(n);
        self
    }

    /// Prefix increment.
    #[inline]
    pub const fn step_forward(&mut self) -> &mut Self {
        self.advance(1)
    }

    /// Prefix decrement.
    #[inline]
    pub const fn step_back(&mut self) -> &mut Self {
        self.retreat(1)
    }

    /// Postfix increment: moves forward and returns the cursor as it was.
    #[inline]
    pub const fn post_step_forward(&mut self) -> Self {
        let before = *self;
        self.advance(1);
        before
    }

    /// Postfix decrement: moves back and returns the cursor as it was.
    #[inline]
    pub const fn post_step_back(&mut self) -> Self {
        let before = *self;
        self.retreat(1);
        before
    }

    /// Returns a cursor `n` elements away, leaving `self` untouched.
    #[inline]
    pub const fn offset(&self, n: isize) -> Self {
        Self {
            run: self.run,
            pos: self.pos.wrapping_add(n),
        }
    }

    /// Returns `true` if [`get`](Cursor::get) would yield an element.
    #[inline]
    pub const fn is_dereferenceable(&self) -> bool {
        self.pos >= 0 && (self.pos as usize) < self.run.len()
    }

    /// Returns the element under the cursor, or `None` outside `0..len`.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        usize::try_from(self.pos).ok().and_then(|index| self.run.get(index))
    }

    /// Returns the element under the cursor without checking the position.
    ///
    /// # Safety
    /// [`is_dereferenceable`](Cursor::is_dereferenceable) must be `true`.
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        debug_assert!(self.is_dereferenceable());
        unsafe { self.run.get_unchecked(self.pos as usize) }
    }

    /// Returns the element `n` positions away.
    #[inline]
    pub fn at(&self, n: isize) -> Option<&'a T> {
        self.offset(n).get()
    }

    /// Signed number of steps from `origin` to `self`.
    #[inline]
    pub const fn distance(&self, origin: &Self) -> isize {
        self.pos.wrapping_sub(origin.pos)
    }

    /// Elements from the cursor to the end of the run.
    ///
    /// Empty when the cursor is before the start or past the end.
    #[inline]
    pub fn remaining(&self) -> &'a [T] {
        match usize::try_from(self.pos) {
            Ok(start) if start <= self.run.len() => &self.run[start..],
            _ => &[],
        }
    }

    /// Elements in `[self, end)`.
    ///
    /// Empty when the cursors belong to different runs or do not describe
    /// an in-bounds forward range. See [`Cursor`] for zero-sized elements.
    ///
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let vec: HybridVec<u8, 8> = hybridvec![1, 2, 3, 4];
    /// assert_eq!(vec.begin().offset(1).slice_to(&vec.end()), [2, 3, 4]);
    /// assert!(vec.end().slice_to(&vec.begin()).is_empty());
    /// ```
    pub fn slice_to(&self, end: &Self) -> &'a [T] {
        if !self.same_run(end) {
            return &[];
        }
        match (usize::try_from(self.pos), usize::try_from(end.pos)) {
            (Ok(start), Ok(stop)) if start <= stop && stop <= self.run.len() => {
                &self.run[start..stop]
            }
            _ => &[],
        }
    }

    // Cannot separate equal-length runs of a zero-sized `T`.
    #[inline]
    fn same_run(&self, other: &Self) -> bool {
        ptr::eq(self.run.as_ptr(), other.run.as_ptr()) && self.run.len() == other.run.len()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.same_run(other) && self.pos == other.pos
    }
}

/// Cursors over different runs are unordered.
impl<T> PartialOrd for Cursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_run(other).then(|| self.pos.cmp(&other.pos))
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.pos)
            .field("len", &self.run.len())
            .finish()
    }
}

impl<T> AddAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        self.advance(n);
    }
}

impl<T> SubAssign<usize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        self.retreat(n);
    }
}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: usize) -> Self {
        self.advance(n);
        self
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: usize) -> Self {
        self.retreat(n);
        self
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    #[inline]
    fn sub(self, origin: Self) -> isize {
        self.distance(&origin)
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        match self.at(n) {
            Some(item) => item,
            None => panic!(
                "cursor offset {} out of range for length {}",
                self.pos.wrapping_add(n),
                self.run.len()
            ),
        }
    }
}

impl<T> core::ops::Deref for Cursor<'_, T> {
    type Target = T;

    /// # Panics
    /// Panics when the cursor is not on an element.
    #[inline]
    fn deref(&self) -> &T {
        &self[0]
    }
}
