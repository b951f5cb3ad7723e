use std::fmt;

use crate::{RingBuffer, Storage};

impl<S: Storage> fmt::Debug for RingBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (front, back) = self.as_slices();
        f.debug_list().entries(front.iter().chain(back)).finish()
    }
}

#[cfg(feature = "std")]
mod io_impls {
    use std::cmp;
    use std::io;

    use crate::{RingBuffer, Storage};

    /// Appends as many bytes as currently fit. A full buffer accepts 0 bytes.
    impl<S: Storage> io::Write for RingBuffer<S> {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            let len = cmp::min(bytes.len(), self.available_for_write());
            self.append(&bytes[..len]).map_err(io::Error::other)
        }

        #[inline]
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Consumes up to `out.len()` bytes from the front.
    impl<S: Storage> io::Read for RingBuffer<S> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let len = cmp::min(out.len(), self.available_for_read());
            self.read_bytes(&mut out[..len]).map_err(io::Error::other)
        }
    }
}
