use alloc::vec::Vec;
use core::{
    alloc::Layout,
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Add, AddAssign, Deref, DerefMut, Index, IndexMut},
    slice::{self, SliceIndex},
};

use crate::{
    Cursor,
    error::{Error, Result, infallible},
    inline_buf::InlineBuf,
};

/// Inline slots used when the capacity parameter is omitted.
pub const DEFAULT_INLINE_CAPACITY: usize = 1024;

/// Which buffer currently holds the elements.
enum Storage<T, const N: usize> {
    Inline(InlineBuf<T, N>),
    // `items.capacity() >= capacity` always; `capacity` is the logical one.
    Heap { items: Vec<T>, capacity: usize },
}

/// A vector that keeps its elements inline until they outgrow `N` slots,
/// then moves them to a heap buffer that doubles on demand.
///
/// One slot is always kept free: the vector grows as soon as `len + 1`
/// reaches the capacity. An inline vector therefore holds at most `N - 1`
/// elements, and the first growth moves everything to a heap buffer of
/// `2 * N` slots. Every later growth doubles again.
///
/// Elements are moved between buffers, never cloned, so `T` can own
/// resources of its own.
///
/// # Example
///
/// ```
/// use hybridvec::HybridVec;
///
/// let mut vec: HybridVec<&'static str, 4> = HybridVec::new();
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push("b");
/// vec.push("c");
/// vec.push_front("a");
/// assert!(vec.is_inline());
/// assert_eq!(vec, ["a", "b", "c"]);
///
/// // The fourth element would fill the last inline slot, so the vector spills.
/// vec.push("d");
/// assert!(!vec.is_inline());
/// assert_eq!(vec.capacity(), 8);
///
/// let reversed = vec.reversed();
/// assert_eq!(reversed, ["d", "c", "b", "a"]);
/// assert_eq!(vec, ["a", "b", "c", "d"]);
/// ```
#[repr(transparent)]
pub struct HybridVec<T, const N: usize = DEFAULT_INLINE_CAPACITY>(Storage<T, N>);

/// Creates a [`HybridVec`] containing the arguments.
///
/// The syntax is similar to [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
/// Elements beyond the inline capacity go to the heap.
///
/// # Examples
///
/// ```
/// # use hybridvec::{hybridvec, HybridVec};
/// let vec: HybridVec<String, 10> = hybridvec![];
/// let vec: HybridVec<i64, 10> = hybridvec![1; 5]; // Need to support Clone.
/// let vec: HybridVec<_, 10> = hybridvec![1, 2, 3, 4];
/// ```
#[macro_export]
macro_rules! hybridvec {
    [] => { $crate::HybridVec::new() };
    [$elem:expr; $n:expr] => { $crate::HybridVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::HybridVec::from([ $($item),+ ]) };
}

/// Allocates an empty `Vec` with room for exactly `capacity` elements.
fn allocate<T>(capacity: usize) -> Result<Vec<T>> {
    let layout = Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)?;
    let mut items = Vec::new();
    if items.try_reserve_exact(capacity).is_err() {
        tracing::warn!(bytes = layout.size(), capacity, "heap buffer allocation failed");
        return Err(Error::OutOfMemory { layout });
    }
    Ok(items)
}

impl<T, const N: usize> HybridVec<T, N> {
    const INLINE_NOT_EMPTY: () = assert!(N > 0, "inline capacity must be at least 1");

    /// Constructs a new, empty `HybridVec` using its inline buffer.
    ///
    /// The inline slots live inside the value, so a large `N` makes the
    /// vector itself large.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hybridvec::HybridVec;
    /// let vec: HybridVec<i32, 8> = HybridVec::new();
    /// assert!(vec.is_empty());
    /// assert!(vec.is_inline());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        let () = Self::INLINE_NOT_EMPTY;
        Self(Storage::Inline(InlineBuf::new()))
    }

    /// Returns `true` if the elements are stored in the inline buffer.
    #[inline(always)]
    pub const fn is_inline(&self) -> bool {
        matches!(self.0, Storage::Inline(_))
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub const fn len(&self) -> usize {
        match &self.0 {
            Storage::Inline(buf) => buf.len(),
            Storage::Heap { items, .. } => items.len(),
        }
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the active buffer.
    ///
    /// This is `N` while inline and `N * 2^k` after `k` growths. It is always
    /// strictly greater than [`len`](HybridVec::len).
    #[inline]
    pub const fn capacity(&self) -> usize {
        match &self.0 {
            Storage::Inline(_) => N,
            Storage::Heap { capacity, .. } => *capacity,
        }
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.0 {
            Storage::Inline(buf) => buf.as_slice(),
            Storage::Heap { items, .. } => items.as_slice(),
        }
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.0 {
            Storage::Inline(buf) => buf.as_mut_slice(),
            Storage::Heap { items, .. } => items.as_mut_slice(),
        }
    }

    /// Replaces the active buffer with a heap buffer of `new_capacity` slots.
    ///
    /// The elements are moved in order and the previous heap buffer, if
    /// any, is released. Nothing changes when the allocation fails.
    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity > self.capacity());
        let old_capacity = self.capacity();
        let mut items = allocate::<T>(new_capacity)?;

        match &mut self.0 {
            Storage::Inline(buf) => {
                buf.move_into(&mut items);
                tracing::trace!(
                    len = items.len(),
                    capacity = new_capacity,
                    "spilled inline buffer to heap"
                );
            }
            Storage::Heap { items: old, .. } => {
                items.append(old);
                tracing::trace!(
                    len = items.len(),
                    from = old_capacity,
                    to = new_capacity,
                    "grew heap buffer"
                );
            }
        }

        self.0 = Storage::Heap {
            items,
            capacity: new_capacity,
        };
        Ok(())
    }

    /// Doubles the capacity if the next element would take the last free slot.
    #[inline]
    fn grow_for_one(&mut self) -> Result<()> {
        let capacity = self.capacity();
        debug_assert!(self.len() < capacity);
        if self.len() + 1 == capacity {
            let doubled = capacity.checked_mul(2).ok_or(Error::CapacityOverflow)?;
            self.grow_to(doubled)?;
        }
        Ok(())
    }

    /// Ensures `additional` more elements fit while keeping one slot free.
    ///
    /// Capacity only ever doubles, so this picks the smallest doubled
    /// capacity that fits and moves the elements once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let mut vec: HybridVec<u8, 4> = hybridvec![1];
    /// vec.try_reserve(2).unwrap();
    /// assert!(vec.is_inline());
    ///
    /// vec.try_reserve(10).unwrap();
    /// assert_eq!(vec.capacity(), 16);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        let mut capacity = self.capacity();
        if required < capacity {
            return Ok(());
        }
        while required >= capacity {
            capacity = capacity.checked_mul(2).ok_or(Error::CapacityOverflow)?;
        }
        self.grow_to(capacity)
    }

    /// Infallible form of [`try_reserve`](HybridVec::try_reserve).
    ///
    /// # Panics
    /// Panics on capacity overflow; allocation failure goes to
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        infallible(self.try_reserve(additional));
    }

    /// Appends an element, doubling the capacity first if needed.
    ///
    /// On error the vector is unchanged and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hybridvec::HybridVec;
    /// let mut vec: HybridVec<u32, 2> = HybridVec::new();
    /// vec.try_push(1).unwrap();
    /// vec.try_push(2).unwrap();
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn try_push(&mut self, value: T) -> Result<()> {
        self.grow_for_one()?;
        match &mut self.0 {
            // SAFETY: `grow_for_one` left at least two free slots, so len < N.
            Storage::Inline(buf) => unsafe { buf.push_unchecked(value) },
            // `items` has room for `capacity > len + 1` elements, no reallocation.
            Storage::Heap { items, .. } => items.push(value),
        }
        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Time complexity
    /// Amortized O(1). A growth moves every element to a buffer twice as large.
    ///
    /// # Panics
    /// Panics on capacity overflow; allocation failure goes to
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    ///
    /// # Examples
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let mut vec: HybridVec<_, 4> = hybridvec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        infallible(self.try_push(value));
    }

    /// Inserts an element at the front, doubling the capacity first if needed.
    ///
    /// On error the vector is unchanged and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        self.grow_for_one()?;
        match &mut self.0 {
            // SAFETY: `0 <= len` and `grow_for_one` guarantees len < N.
            Storage::Inline(buf) => unsafe { buf.insert_unchecked(0, value) },
            Storage::Heap { items, .. } => items.insert(0, value),
        }
        Ok(())
    }

    /// Inserts an element at the front, shifting every element one slot up.
    ///
    /// # Time complexity
    /// O(n).
    ///
    /// # Panics
    /// Same as [`push`](HybridVec::push).
    ///
    /// # Examples
    /// ```
    /// # use hybridvec::HybridVec;
    /// let mut vec: HybridVec<_, 4> = HybridVec::new();
    /// vec.push_front(3);
    /// vec.push_front(2);
    /// vec.push_front(1);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    pub fn push_front(&mut self, value: T) {
        infallible(self.try_push_front(value));
    }

    /// Removes the last element and returns it, or `None` if it is empty.
    ///
    /// The active buffer and capacity are kept.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match &mut self.0 {
            Storage::Inline(buf) => buf.pop(),
            Storage::Heap { items, .. } => items.pop(),
        }
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Has no effect if `len` is greater than the current length.
    pub fn truncate(&mut self, len: usize) {
        match &mut self.0 {
            Storage::Inline(buf) => buf.truncate(len),
            Storage::Heap { items, .. } => items.truncate(len),
        }
    }

    /// Drops every element. The active buffer and capacity are kept.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Checked access to the element at `index`.
    ///
    /// # Examples
    /// ```
    /// # use hybridvec::{Error, HybridVec, hybridvec};
    /// let vec: HybridVec<_, 4> = hybridvec!['a', 'b'];
    /// assert_eq!(vec.at(1), Ok(&'b'));
    /// assert_eq!(vec.at(2), Err(Error::IndexOutOfBounds { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Checked mutable access to the element at `index`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice())
    }

    /// Cursor one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::at_end(self.as_slice())
    }

    /// Cursor at the last element, the start of a reverse walk.
    #[inline]
    pub fn rbegin(&self) -> Cursor<'_, T> {
        self.end() - 1
    }

    /// Cursor one before the first element, where a reverse walk stops.
    ///
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let vec: HybridVec<_, 8> = hybridvec![1, 2, 3];
    /// let mut out = Vec::new();
    /// let mut cursor = vec.rbegin();
    /// while cursor != vec.rend() {
    ///     out.push(*cursor);
    ///     cursor.step_back();
    /// }
    /// assert_eq!(out, [3, 2, 1]);
    /// ```
    #[inline]
    pub fn rend(&self) -> Cursor<'_, T> {
        self.begin() - 1
    }

    /// Moves the contents out, leaving `self` empty and inline.
    ///
    /// A heap buffer changes owner without touching its elements. Inline
    /// elements are moved into the returned vector's own inline buffer.
    /// The source stays fully usable afterwards.
    ///
    /// # Examples
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let mut a: HybridVec<_, 4> = hybridvec![1, 2, 3, 4, 5];
    /// let b = a.take();
    /// assert!(a.is_empty() && a.is_inline());
    /// assert_eq!(b, [1, 2, 3, 4, 5]);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Releases the current contents and takes over those of `other`,
    /// which is left empty and inline.
    #[inline]
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    /// Converts the vector into a [`Vec`].
    ///
    /// Inline elements are moved into an exact allocation; a heap buffer is
    /// returned as is.
    pub fn into_vec(self) -> Vec<T> {
        match self.0 {
            Storage::Inline(mut buf) => {
                let mut items = Vec::with_capacity(buf.len());
                buf.move_into(&mut items);
                items
            }
            Storage::Heap { items, .. } => items,
        }
    }
}

impl<T: Clone, const N: usize> HybridVec<T, N> {
    /// Creates a vector holding `num` clones of `elem`.
    pub fn from_elem(elem: T, num: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(num);
        for _ in 0..num {
            vec.push(elem.clone());
        }
        vec
    }

    /// Clones and appends every element of `other`, growing at most once.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve(other.len());
        for item in other {
            self.push(item.clone());
        }
    }

    /// Appends clones of every element of `other`, in order, and returns
    /// the receiver for chaining. Also available as `+` and `+=`.
    ///
    /// # Examples
    /// ```
    /// # use hybridvec::{HybridVec, hybridvec};
    /// let mut a: HybridVec<_, 4> = hybridvec![1, 2];
    /// let b: HybridVec<_, 4> = hybridvec![3, 4];
    /// a.concat(&b).concat(&b);
    /// assert_eq!(a, [1, 2, 3, 4, 3, 4]);
    /// ```
    pub fn concat<const M: usize>(&mut self, other: &HybridVec<T, M>) -> &mut Self {
        self.extend_from_slice(other.begin().slice_to(&other.end()));
        self
    }

    /// Returns a new vector with the elements in reverse order.
    ///
    /// The receiver is left untouched.
    pub fn reversed(&self) -> Self {
        let mut reversed = Self::new();
        reversed.reserve(self.len());

        let rend = self.rend();
        let mut cursor = self.rbegin();
        while cursor != rend {
            if let Some(item) = cursor.get() {
                reversed.push(item.clone());
            }
            cursor.step_back();
        }
        reversed
    }

    /// Clones the vector into independent storage.
    ///
    /// The copy is inline when the length leaves a free inline slot, and
    /// otherwise gets a heap buffer of the source's capacity.
    pub fn try_clone(&self) -> Result<Self> {
        let src = self.as_slice();
        if src.len() < N {
            return Ok(Self(Storage::Inline(InlineBuf::from_slice(src))));
        }

        let capacity = self.capacity();
        let mut items = allocate::<T>(capacity)?;
        items.extend_from_slice(src);
        Ok(Self(Storage::Heap { items, capacity }))
    }
}

impl<T: Clone, const N: usize> Clone for HybridVec<T, N> {
    #[inline]
    fn clone(&self) -> Self {
        infallible(self.try_clone())
    }

    /// Releases the receiver's buffer before cloning `source` into it.
    fn clone_from(&mut self, source: &Self) {
        self.0 = Storage::Inline(InlineBuf::new());
        *self = source.clone();
    }
}

impl<T, const N: usize> Default for HybridVec<T, N> {
    /// It's eq to [`HybridVec::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize, const M: usize> AddAssign<&HybridVec<T, M>> for HybridVec<T, N> {
    #[inline]
    fn add_assign(&mut self, rhs: &HybridVec<T, M>) {
        self.concat(rhs);
    }
}

impl<T: Clone, const N: usize, const M: usize> Add<&HybridVec<T, M>> for HybridVec<T, N> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: &HybridVec<T, M>) -> Self {
        self.concat(rhs);
        self
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for HybridVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (hint, _) = iter.size_hint();
        self.reserve(hint);

        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> Extend<T> for HybridVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (hint, _) = iter.size_hint();
        self.reserve(hint);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T, const N: usize> FromIterator<T> for HybridVec<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize> Deref for HybridVec<T, N> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for HybridVec<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for HybridVec<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

// Hash, Eq and Ord must match the slice's.
impl<T, const N: usize> Borrow<[T]> for HybridVec<T, N> {
    #[inline]
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize> Index<I> for HybridVec<T, N> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &I::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>, const N: usize> IndexMut<I> for HybridVec<T, N> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a HybridVec<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut HybridVec<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for HybridVec<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: Hash, const N: usize> Hash for HybridVec<T, N> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// Vectors with different inline capacities compare by their elements.
impl<T, U, const N: usize, const M: usize> PartialEq<HybridVec<U, M>> for HybridVec<T, N>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &HybridVec<U, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for HybridVec<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for HybridVec<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, const N: usize> Ord for HybridVec<T, N> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

/// Equality against the slice-like types a literal is usually written as.
macro_rules! eq_slice_like {
    ($($rhs:ty $(, const $p:ident)?);+ $(;)?) => {$(
        impl<T, U, const N: usize $(, const $p: usize)?> PartialEq<$rhs> for HybridVec<T, N>
        where
            T: PartialEq<U>,
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                self.as_slice()[..] == other[..]
            }
        }
    )+};
}

eq_slice_like! {
    [U];
    &[U];
    [U; P], const P;
    &[U; P], const P;
}

impl<T: Clone, const N: usize> From<&[T]> for HybridVec<T, N> {
    fn from(value: &[T]) -> Self {
        let mut vec = Self::new();
        vec.extend_from_slice(value);
        vec
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for HybridVec<T, N> {
    fn from(value: [T; P]) -> Self {
        value.into_iter().collect()
    }
}

impl<T, const N: usize> From<Vec<T>> for HybridVec<T, N> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T, const N: usize> From<HybridVec<T, N>> for Vec<T> {
    #[inline]
    fn from(value: HybridVec<T, N>) -> Self {
        value.into_vec()
    }
}
