//! ## Intro
//!
//! A growable vector with a small-buffer optimization: the first elements live
//! in an inline buffer inside the vector itself, and the vector moves to a heap
//! buffer, doubling its capacity, only once that buffer is used up.
//!
//! Many workloads build short sequences that fit comfortably inline but must
//! still cope with the occasional long one. Keeping the short ones off the
//! heap saves an allocation and keeps the data next to its owner.
//!
//! ## Containers
//!
//! ### `HybridVec`
//!
//! - **Inline first**: `N` slots embedded in the value (default 1024)
//! - **Enum-based**: internally either an inline buffer or a heap buffer
//! - **Doubling growth**: one slot is always kept free, so an inline vector
//!   holds at most `N - 1` elements before it spills
//! - **Vec-like** interface through `Deref<Target = [T]>`
//!
//! ```
//! # use hybridvec::{HybridVec, hybridvec};
//! let mut vec: HybridVec<i32, 4> = hybridvec![1, 2, 3];
//! assert!(vec.is_inline());
//!
//! vec.push(4);
//! assert!(!vec.is_inline());
//! assert_eq!(vec.capacity(), 8);
//! assert_eq!(vec, [1, 2, 3, 4]);
//! ```
//!
//! ### `Cursor`
//!
//! A random-access position borrowed from a vector, with pointer-like
//! stepping and comparisons. See [`HybridVec::begin`] and friends.
//!
//! ```
//! # use hybridvec::{HybridVec, hybridvec};
//! let vec: HybridVec<char, 8> = hybridvec!['a', 'b', 'c'];
//! let mut cursor = vec.rbegin();
//! let mut out = String::new();
//! while cursor != vec.rend() {
//!     out.push(*cursor.post_step_back());
//! }
//! assert_eq!(out, "cba");
//! ```
//!
//! ## Errors
//!
//! Operations that allocate have a `try_` form returning [`Error`]. The plain
//! forms behave like [`Vec`]: they panic on capacity overflow and call the
//! global allocation error handler when memory runs out.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`. Storage transitions are
//! reported through [`tracing`](https://docs.rs/tracing) at `trace` level.
//!
//! ## Optional features
//!
//! ### `std`
//!
//! Enabled by default. Implements [`std::io::Write`] for `HybridVec<u8, N>`.
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, [`HybridVec`] implements the
//! [`serde::Serialize`] and [`serde::Deserialize`] traits.
//!
//! [`serde::Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`serde::Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html
//! [`Vec`]: alloc::vec::Vec
//! [`std::io::Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
#![no_std]

extern crate alloc;

mod inline_buf;

pub mod cursor;
#[doc(inline)]
pub use cursor::Cursor;

pub mod error;
#[doc(inline)]
pub use error::{Error, Result};

pub mod hybrid_vec;
#[doc(inline)]
pub use hybrid_vec::{DEFAULT_INLINE_CAPACITY, HybridVec};

#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "std")]
mod std_io;

/// A `HybridVec` with 16 inline slots, for collections that are usually
/// a handful of elements.
///
/// # Examples
///
/// ```
/// # use hybridvec::SmallHybridVec;
/// let mut vec: SmallHybridVec<u32> = SmallHybridVec::new();
/// vec.extend(0..15);
/// assert!(vec.is_inline());
///
/// vec.push(15);
/// assert!(!vec.is_inline());
/// assert_eq!(vec.len(), 16);
/// ```
pub type SmallHybridVec<T> = HybridVec<T, 16>;
