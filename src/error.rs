use core::alloc::Layout;

/// Errors reported by the fallible [`HybridVec`](crate::HybridVec) operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The allocator could not provide a heap buffer with this layout.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    OutOfMemory { layout: Layout },

    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// A checked access was made past the initialized elements.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Turns an allocation result into the `Vec`-style infallible behavior:
/// capacity overflow panics, allocation failure goes to the global handler.
#[inline]
pub(crate) fn infallible<T>(res: Result<T>) -> T {
    match res {
        Ok(value) => value,
        Err(Error::OutOfMemory { layout }) => alloc::alloc::handle_alloc_error(layout),
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let layout = Layout::array::<u64>(4).unwrap();
        assert_eq!(
            Error::OutOfMemory { layout }.to_string(),
            "memory allocation of 32 bytes failed"
        );
        assert_eq!(Error::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            Error::IndexOutOfBounds { index: 7, len: 3 }.to_string(),
            "index 7 out of range for length 3"
        );
    }

    #[test]
    fn infallible_passes_values_through() {
        assert_eq!(infallible(Ok(5)), 5);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn infallible_panics_on_overflow() {
        infallible::<()>(Err(Error::CapacityOverflow));
    }
}
