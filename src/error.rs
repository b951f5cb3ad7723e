//! Error values returned by `RingBuffer` operations.

use thiserror::Error;

/// Error value indicating why a buffer operation was refused.
///
/// No operation retries internally and a refused operation never mutates
/// the buffer.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash, Error)]
pub enum Error {
    /// The backing storage has no slots.
    #[error("backing storage is empty")]
    Null,
    /// The write does not fit into the free capacity, or the destination of
    /// a full read is too small.
    #[error("insufficient capacity")]
    Insufficient,
    /// More bytes were requested than are stored.
    #[error("requested size exceeds available data")]
    Mismatch,
}

impl Error {
    /// Returns the negative status code used by sentinel-value interfaces.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytering::Error;
    ///
    /// assert_eq!(Error::Null.code(), -301);
    /// assert_eq!(Error::Insufficient.code(), -302);
    /// assert_eq!(Error::Mismatch.code(), -303);
    /// ```
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            Error::Null => -301,
            Error::Insufficient => -302,
            Error::Mismatch => -303,
        }
    }
}

/// Physical layout of the stored bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Layout {
    /// The valid bytes form a single run inside the backing storage.
    Contiguous,
    /// The valid bytes cross the physical end of the storage and continue at
    /// index 0.
    Wrapped,
}

impl Layout {
    /// Returns `0` for `Contiguous` and `1` for `Wrapped`.
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            Layout::Contiguous => 0,
            Layout::Wrapped => 1,
        }
    }
}
