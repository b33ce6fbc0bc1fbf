extern crate std;

use std::io::{self, IoSlice, Write};

use crate::HybridVec;

/// Write is implemented for `HybridVec<u8, N>` by appending to the vector.
/// The vector will grow as needed.
///
/// Allocation failure is reported as [`io::ErrorKind::OutOfMemory`] instead of
/// aborting.
impl<const N: usize> Write for HybridVec<u8, N> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.try_reserve(buf.len()).map_err(to_io_error)?;
        self.extend_from_slice(buf);
        Ok(buf.len())
    }

    #[inline(always)]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let num = bufs.iter().map(|b| b.len()).sum::<usize>();
        self.try_reserve(num).map_err(to_io_error)?;
        for buf in bufs {
            self.extend_from_slice(buf);
        }
        Ok(num)
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write(buf).map(drop)
    }
}

fn to_io_error(err: crate::Error) -> io::Error {
    match err {
        crate::Error::OutOfMemory { .. } => io::Error::new(io::ErrorKind::OutOfMemory, err),
        other => io::Error::other(other),
    }
}
