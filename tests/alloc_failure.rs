//! Allocation failure must surface as an error and leave the vector as it was.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use hybridvec::{Error, HybridVec};

const HARD_LIMIT: usize = 1 << 30;

thread_local! {
    static LIMIT: Cell<usize> = const { Cell::new(HARD_LIMIT) };
}

/// Refuses requests of 1 GiB or more, or of the current thread's limit.
struct CappedAlloc;

unsafe impl GlobalAlloc for CappedAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let limit = LIMIT.try_with(Cell::get).unwrap_or(HARD_LIMIT);
        if layout.size() >= limit.min(HARD_LIMIT) {
            return std::ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CappedAlloc = CappedAlloc;

/// Lowers the allocation limit for this thread until dropped.
struct LimitGuard;

impl LimitGuard {
    fn new(bytes: usize) -> Self {
        LIMIT.with(|limit| limit.set(bytes));
        LimitGuard
    }
}

impl Drop for LimitGuard {
    fn drop(&mut self) {
        LIMIT.with(|limit| limit.set(HARD_LIMIT));
    }
}

#[test]
fn reserve_failure_keeps_inline_contents() {
    let mut vec: HybridVec<u8, 4> = HybridVec::new();
    vec.push(1);

    let err = vec.try_reserve(1 << 30).unwrap_err();
    match err {
        Error::OutOfMemory { layout } => assert_eq!(layout.size(), 1 << 31),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(vec.is_inline());
    assert_eq!(vec.capacity(), 4);
    assert_eq!(vec, [1]);

    vec.push(2);
    assert_eq!(vec, [1, 2]);
}

#[test]
fn push_failure_keeps_heap_contents() {
    let mut vec: HybridVec<u64, 2> = (0..7).collect();
    assert!(!vec.is_inline());
    assert_eq!(vec.capacity(), 8);
    let ptr = vec.as_ptr();

    {
        // The next push needs 16 slots, 128 bytes.
        let _guard = LimitGuard::new(128);
        assert!(matches!(vec.try_push(7), Err(Error::OutOfMemory { .. })));
        assert!(matches!(vec.try_push_front(7), Err(Error::OutOfMemory { .. })));
        assert!(matches!(vec.try_reserve(1), Err(Error::OutOfMemory { .. })));
        assert!(vec.try_clone().is_ok());
    }

    assert_eq!(vec.len(), 7);
    assert_eq!(vec.capacity(), 8);
    assert_eq!(vec.as_ptr(), ptr);
    assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6]);

    vec.push(7);
    assert_eq!(vec.capacity(), 16);
}

#[test]
fn clone_failure_is_reported() {
    let vec: HybridVec<u64, 2> = (0..7).collect();
    let _guard = LimitGuard::new(64);
    assert!(matches!(vec.try_clone(), Err(Error::OutOfMemory { .. })));
}

#[cfg(feature = "std")]
#[test]
fn write_failure_maps_to_out_of_memory() {
    use std::io::{ErrorKind, Write};

    let mut vec: HybridVec<u8, 4> = HybridVec::new();
    vec.write_all(b"ok").unwrap();

    let data = [0u8; 1000];
    let err = {
        // 1000 bytes need 1024 slots.
        let _guard = LimitGuard::new(1024);
        vec.write_all(&data).unwrap_err()
    };
    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert!(vec.is_inline());
    assert_eq!(vec, b"ok");
}
