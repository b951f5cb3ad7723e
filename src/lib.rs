//! A byte ring buffer with fixed capacity over caller-owned storage.
//! Requires Rust 1.81+
//!
//! The buffer never allocates. It runs over storage the caller provides,
//! a borrowed `&mut [u8]`, an owned `[u8; N]` stored directly on the stack
//! or, with `std`, a `Vec<u8>`. It is meant for accumulating and draining
//! byte streams such as serial or socket I/O with bounded memory.
//!
//! Bytes are appended at the back and consumed from the front, and protocol
//! headers can be prepended in front of already-buffered payload. When the
//! stored bytes wrap around the physical end of the storage, `contiguate`
//! rotates them back into a single run so they can be handed to APIs expecting
//! a flat slice.
//!
//! # Feature Flags
//! The **bytering** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd, implement `std::io::{Read, Write}` and accept heap
//!     storage (`Vec<u8>`, `Box<[u8]>`)
//!
//!
//! - `use_generic_array`
//!   - Optional
//!   - Depend on generic-array and allow using it just like a fixed
//!     size array for the backing storage.
//!
//! Use the buffer in a `#![no_std]` crate via:
//!
//! ```toml
//! [dependencies]
//! bytering = { version = "0.1", default-features = false }
//! ```
//!
//! # Capacity
//!
//! Note that the `capacity()` is always `storage.len() - 1`. One slot is kept
//! free to tell a full buffer from an empty one.
//! [Read more]
//!
//! [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
//!
//! # Examples
//! ```
//! use bytering::RingBuffer;
//!
//! let mut backing = [0u8; 10];
//! let mut buf = RingBuffer::new(&mut backing[..]).unwrap();
//! assert_eq!(buf.capacity(), 9);
//!
//! buf.append(b"ABCDE").unwrap();
//! assert_eq!(buf.read_byte(), b'A');
//! assert_eq!(buf.read_byte(), b'B');
//!
//! buf.append(b"XYZ").unwrap();
//! assert_eq!(buf.available_for_read(), 6);
//!
//! let mut out = [0u8; 10];
//! let n = buf.read_all(&mut out).unwrap();
//! assert_eq!(&out[..n], b"CDEXYZ");
//! ```
//!
//! # Prepend
//! ```
//! use bytering::RingBuffer;
//!
//! let mut buf = RingBuffer::new([0u8; 16]).unwrap();
//!
//! buf.append(b"payload").unwrap();
//! buf.prepend_u16(7).unwrap();
//! buf.prepend_byte(0x01).unwrap();
//!
//! let mut out = [0u8; 16];
//! let n = buf.read_all(&mut out).unwrap();
//! assert_eq!(&out[..n], b"\x01\x00\x07payload");
//! ```
//!
//! # Zero-copy
//! ```
//! use bytering::RingBuffer;
//!
//! let mut buf = RingBuffer::new([0u8; 8]).unwrap();
//!
//! let region = buf.write_slice();
//! region[..3].copy_from_slice(b"abc");
//! buf.empty_write(3);
//!
//! assert_eq!(buf.read_slice(), Some(&b"abc"[..]));
//! buf.empty_read(3).unwrap();
//! assert!(buf.is_empty());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", test)))]
extern crate core as std;

use std::cmp;

use tracing::{debug, warn};

pub mod error;
mod storage;
mod trait_impls;
mod utils;

#[cfg(test)]
mod properties;

pub use error::{Error, Layout};
pub use storage::Storage;
use utils::{count, free, wrap_add, wrap_sub};

/// A fixed capacity byte ring buffer.
///
/// Valid bytes occupy the circular span `[tail, head)` of the backing
/// storage. `head` is the next slot an append writes, `tail` the next slot a
/// read consumes.
///
/// # Capacity
///
/// Note that the `capacity()` is always `storage.len() - 1`.
/// [Read more]
///
/// [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
pub struct RingBuffer<S: Storage> {
    data: S,
    size: usize,
    head: usize,
    tail: usize,
}

impl<S: Storage> RingBuffer<S> {
    #[inline]
    fn wrap_add(&self, index: usize, addend: usize) -> usize {
        wrap_add(index, addend, self.size)
    }

    #[inline]
    fn wrap_sub(&self, index: usize, subtrahend: usize) -> usize {
        wrap_sub(index, subtrahend, self.size)
    }

    #[inline]
    fn buffer(&self) -> &[u8] {
        &self.data.as_slice()[..self.size]
    }

    #[inline]
    fn buffer_mut(&mut self) -> &mut [u8] {
        let size = self.size;
        &mut self.data.as_mut_slice()[..size]
    }
}

impl<S: Storage> RingBuffer<S> {
    /// Creates an empty `RingBuffer` over `storage`.
    ///
    /// The slot count is the storage length at this point. Returns
    /// `Error::Null` if the storage has no slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::{Error, RingBuffer};
    ///
    /// let mut backing = [0u8; 4];
    /// let buf = RingBuffer::new(&mut backing[..]).unwrap();
    /// assert!(buf.is_empty());
    ///
    /// let mut nothing: [u8; 0] = [];
    /// assert_eq!(RingBuffer::new(&mut nothing[..]).err(), Some(Error::Null));
    /// ```
    pub fn new(storage: S) -> Result<Self, Error> {
        let size = storage.as_slice().len();
        if size == 0 {
            warn!("refusing to build a ring buffer over empty storage");
            return Err(Error::Null);
        }

        Ok(RingBuffer {
            data: storage,
            size,
            head: 0,
            tail: 0,
        })
    }

    /// Gives the backing storage back, discarding the buffer state.
    #[inline]
    pub fn into_inner(self) -> S {
        self.data
    }

    /// Returns the number of slots in the backing storage.
    #[inline]
    pub fn array_len(&self) -> usize {
        self.size
    }

    /// Return the capacity of the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let buf = RingBuffer::new([0u8; 4]).unwrap();
    /// assert_eq!(buf.capacity(), 3);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.size - 1
    }

    /// Returns true if the buffer holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if no further byte can be written.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 2]).unwrap();
    /// assert!(!buf.is_full());
    ///
    /// buf.append_byte(1).unwrap();
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.wrap_add(self.head, 1) == self.tail
    }

    /// Returns the number of bytes stored.
    #[inline]
    pub fn available_for_read(&self) -> usize {
        count(self.tail, self.head, self.size)
    }

    /// Returns the number of bytes that can still be written.
    ///
    /// Always `capacity() - available_for_read()`.
    #[inline]
    pub fn available_for_write(&self) -> usize {
        free(self.tail, self.head, self.size)
    }

    /// Reports whether the stored bytes form one run in the backing storage.
    ///
    /// A buffer whose `head` sits at index 0 counts as contiguous: its bytes
    /// run from `tail` to the physical end and do not cross it.
    #[inline]
    pub fn layout(&self) -> Layout {
        if self.head < self.tail && self.head != 0 {
            Layout::Wrapped
        } else {
            Layout::Contiguous
        }
    }

    /// Returns true unless the stored bytes wrap around the physical end.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout() == Layout::Contiguous
    }

    /// Returns a pair of slices which contain, in order, the stored bytes.
    ///
    /// The second slice is empty unless the buffer is wrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 6]).unwrap();
    ///
    /// buf.append(b"abc").unwrap();
    /// assert_eq!(buf.as_slices(), (&b"abc"[..], &b""[..]));
    ///
    /// buf.prepend(b"xy").unwrap();
    /// assert_eq!(buf.as_slices(), (&b"xy"[..], &b"abc"[..]));
    /// ```
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let (head, tail) = (self.head, self.tail);
        let buf = self.buffer();

        if head < tail {
            let (left, right) = buf.split_at(tail);
            (right, &left[..head])
        } else {
            (&buf[tail..head], &buf[..0])
        }
    }

    /// Appends `bytes` at the back of the buffer.
    ///
    /// Nothing is written unless all of `bytes` fits, in which case
    /// `Error::Insufficient` is returned. Returns the number of bytes written.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::{Error, RingBuffer};
    ///
    /// let mut buf = RingBuffer::new([0u8; 4]).unwrap();
    /// assert_eq!(buf.append(b"abc"), Ok(3));
    /// assert_eq!(buf.append(b"d"), Err(Error::Insufficient));
    /// ```
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        let len = bytes.len();
        if len == 0 {
            return Ok(0);
        }
        if self.available_for_write() < len {
            return Err(Error::Insufficient);
        }

        let head = self.head;
        let size = self.size;
        let buf = self.buffer_mut();

        if head + len > size {
            let pre_wrap_len = size - head;
            buf[head..].copy_from_slice(&bytes[..pre_wrap_len]);
            buf[..len - pre_wrap_len].copy_from_slice(&bytes[pre_wrap_len..]);
        } else {
            buf[head..head + len].copy_from_slice(bytes);
        }

        self.head = self.wrap_add(head, len);
        Ok(len)
    }

    /// Appends a single byte at the back of the buffer.
    ///
    /// An empty buffer is re-anchored at index 0 first.
    pub fn append_byte(&mut self, byte: u8) -> Result<usize, Error> {
        if self.is_full() {
            return Err(Error::Insufficient);
        }
        if self.is_empty() {
            self.head = 0;
            self.tail = 0;
        }

        let head = self.head;
        self.buffer_mut()[head] = byte;
        self.head = self.wrap_add(head, 1);
        Ok(1)
    }

    /// Commits `len` bytes already written through `write_slice`.
    ///
    /// No bounds check is done: `len` must not exceed the length of the
    /// last `write_slice()`, otherwise stored bytes are silently lost.
    #[inline]
    pub fn empty_write(&mut self, len: usize) -> usize {
        debug_assert!(len <= self.available_for_write(),
                      "empty_write len={} free={}",
                      len,
                      self.available_for_write());
        self.head = self.wrap_add(self.head, len);
        len
    }

    /// Inserts `bytes` in front of the stored bytes.
    ///
    /// The first prepend into an empty buffer places `bytes` at the physical
    /// end of the storage, leaving the most room for further prepends.
    /// Nothing is written unless all of `bytes` fits, in which case
    /// `Error::Insufficient` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 8]).unwrap();
    /// buf.prepend(b"cd").unwrap();
    /// buf.prepend(b"ab").unwrap();
    ///
    /// let mut out = [0u8; 8];
    /// let n = buf.read_all(&mut out).unwrap();
    /// assert_eq!(&out[..n], b"abcd");
    /// ```
    pub fn prepend(&mut self, bytes: &[u8]) -> Result<usize, Error> {
        let len = bytes.len();
        if len == 0 {
            return Ok(0);
        }
        if self.available_for_write() < len {
            return Err(Error::Insufficient);
        }

        if self.is_empty() {
            let size = self.size;
            self.buffer_mut()[size - len..].copy_from_slice(bytes);
            self.head = 0;
            self.tail = size - len;
            return Ok(len);
        }

        let tail = self.tail;
        let new_tail = self.wrap_sub(tail, len);
        let buf = self.buffer_mut();

        if len > tail {
            //            T
            // 1 [_ _ _ _ X X _ _ _ _ _]
            // 2 [c d e f X X _ _ _ a b]
            //    . . . .           N .
            //
            let spill = len - tail;
            buf[..tail].copy_from_slice(&bytes[spill..]);
            buf[new_tail..].copy_from_slice(&bytes[..spill]);
        } else {
            buf[new_tail..tail].copy_from_slice(bytes);
        }

        self.tail = new_tail;
        Ok(len)
    }

    /// Inserts a single byte in front of the stored bytes.
    pub fn prepend_byte(&mut self, byte: u8) -> Result<usize, Error> {
        if self.is_full() {
            return Err(Error::Insufficient);
        }

        let tail = if self.is_empty() {
            self.head = 0;
            self.size - 1
        } else {
            self.wrap_sub(self.tail, 1)
        };

        self.buffer_mut()[tail] = byte;
        self.tail = tail;
        Ok(1)
    }

    /// Inserts `value` in big-endian order in front of the stored bytes.
    #[inline]
    pub fn prepend_u16(&mut self, value: u16) -> Result<usize, Error> {
        self.prepend(&value.to_be_bytes())
    }

    /// Inserts `value` in big-endian order in front of the stored bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 8]).unwrap();
    /// buf.prepend_u32(0x0102_0304).unwrap();
    /// assert_eq!(buf.read_slice(), Some(&[1, 2, 3, 4][..]));
    /// ```
    #[inline]
    pub fn prepend_u32(&mut self, value: u32) -> Result<usize, Error> {
        self.prepend(&value.to_be_bytes())
    }

    /// Moves every stored byte into `out` and empties the buffer.
    ///
    /// Returns `Error::Insufficient` without reading anything if `out` is
    /// shorter than `available_for_read()`. On success both indices return
    /// to 0.
    pub fn read_all(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let len = self.available_for_read();
        if len > out.len() {
            return Err(Error::Insufficient);
        }

        let (front, back) = self.as_slices();
        out[..front.len()].copy_from_slice(front);
        out[front.len()..len].copy_from_slice(back);

        self.head = 0;
        self.tail = 0;
        Ok(len)
    }

    /// Removes and returns the front byte.
    ///
    /// On an empty buffer a warning is logged and 0 is returned, which cannot
    /// be told apart from a stored zero. Use `try_read_byte` or check
    /// `is_empty` first when that matters.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 4]).unwrap();
    /// buf.append_byte(9).unwrap();
    /// assert_eq!(buf.read_byte(), 9);
    /// assert_eq!(buf.read_byte(), 0);
    /// ```
    pub fn read_byte(&mut self) -> u8 {
        match self.try_read_byte() {
            Some(byte) => byte,
            None => {
                warn!("reading from empty ring buffer");
                0
            }
        }
    }

    /// Removes and returns the front byte, or `None` if the buffer is empty.
    pub fn try_read_byte(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }

        let tail = self.tail;
        let byte = self.buffer()[tail];
        self.tail = self.wrap_add(tail, 1);
        Some(byte)
    }

    /// Fills `out` with exactly `out.len()` bytes from the front.
    ///
    /// Returns `Error::Mismatch` without reading anything if fewer bytes are
    /// stored. Unlike `read_all`, the indices are not re-anchored.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::{Error, RingBuffer};
    ///
    /// let mut buf = RingBuffer::new([0u8; 16]).unwrap();
    /// buf.append(b"123456789").unwrap();
    ///
    /// let mut four = [0u8; 4];
    /// assert_eq!(buf.read_bytes(&mut four), Ok(4));
    /// assert_eq!(&four, b"1234");
    ///
    /// let mut six = [0u8; 6];
    /// assert_eq!(buf.read_bytes(&mut six), Err(Error::Mismatch));
    /// assert_eq!(buf.available_for_read(), 5);
    /// ```
    pub fn read_bytes(&mut self, out: &mut [u8]) -> Result<usize, Error> {
        let len = out.len();
        if len > self.available_for_read() {
            return Err(Error::Mismatch);
        }

        let (front, back) = self.as_slices();
        let pre_wrap_len = cmp::min(len, front.len());
        out[..pre_wrap_len].copy_from_slice(&front[..pre_wrap_len]);
        out[pre_wrap_len..].copy_from_slice(&back[..len - pre_wrap_len]);

        self.tail = self.wrap_add(self.tail, len);
        Ok(len)
    }

    /// Discards `len` bytes from the front without copying them.
    ///
    /// Returns `Error::Mismatch` if fewer bytes are stored.
    pub fn empty_read(&mut self, len: usize) -> Result<usize, Error> {
        if len > self.available_for_read() {
            return Err(Error::Mismatch);
        }

        self.tail = self.wrap_add(self.tail, len);
        Ok(len)
    }

    /// Discards every stored byte and re-anchors both indices at 0.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    /// Rotates the storage in place so the stored bytes start at index 0.
    ///
    /// Only a wrapped buffer is rotated; an empty one is re-anchored at 0 and
    /// a contiguous one is left alone. The rotation costs O(`array_len()`).
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::RingBuffer;
    ///
    /// let mut buf = RingBuffer::new([0u8; 6]).unwrap();
    /// buf.append(b"abc").unwrap();
    /// buf.prepend(b"xy").unwrap();
    /// assert_eq!(buf.read_slice(), None);
    ///
    /// buf.contiguate();
    /// assert_eq!(buf.read_slice(), Some(&b"xyabc"[..]));
    /// ```
    pub fn contiguate(&mut self) {
        if self.is_empty() {
            self.clear();
            return;
        }
        if self.is_contiguous() {
            return;
        }

        let (head, tail) = (self.head, self.tail);
        let len = self.available_for_read();
        debug!(head, tail, size = self.size, "rotating wrapped ring buffer");

        self.buffer_mut().rotate_left(tail);
        self.tail = 0;
        self.head = len;
    }

    /// Returns the stored bytes as one slice, or `None` while they wrap.
    ///
    /// Call `contiguate` first to get a flat view of wrapped bytes.
    pub fn read_slice(&self) -> Option<&[u8]> {
        match self.layout() {
            Layout::Contiguous => Some(self.as_slices().0),
            Layout::Wrapped => None,
        }
    }

    /// Returns the free run of slots starting at `head`.
    ///
    /// The slice never reaches the reserved slot, so it may be shorter than
    /// `available_for_write()` when free space wraps. Commit what was written
    /// with `empty_write`.
    pub fn write_slice(&mut self) -> &mut [u8] {
        let (head, tail, size) = (self.head, self.tail, self.size);
        let end = if head < tail {
            tail - 1
        } else if tail == 0 {
            size - 1
        } else {
            size
        };

        &mut self.buffer_mut()[head..end]
    }
}
