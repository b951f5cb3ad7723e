//! Backing storage for `RingBuffer`.

/// Byte storage a `RingBuffer` runs over.
///
/// The buffer reads the slot count once, at construction. Implementations
/// must keep the slice length fixed for as long as the buffer holds them.
pub trait Storage {
    /// Returns the storage as an immutable byte slice.
    fn as_slice(&self) -> &[u8];

    /// Returns the storage as a mutable byte slice.
    fn as_mut_slice(&mut self) -> &mut [u8];
}

impl<'a> Storage for &'a mut [u8] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

impl<'a, const N: usize> Storage for &'a mut [u8; N] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        &self[..]
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self[..]
    }
}

impl<const N: usize> Storage for [u8; N] {
    #[inline(always)]
    fn as_slice(&self) -> &[u8] {
        self
    }

    #[inline(always)]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        self
    }
}

#[cfg(feature = "std")]
mod heap_impl {
    use super::Storage;

    impl Storage for Vec<u8> {
        #[inline(always)]
        fn as_slice(&self) -> &[u8] {
            self
        }

        #[inline(always)]
        fn as_mut_slice(&mut self) -> &mut [u8] {
            self
        }
    }

    impl Storage for Box<[u8]> {
        #[inline(always)]
        fn as_slice(&self) -> &[u8] {
            self
        }

        #[inline(always)]
        fn as_mut_slice(&mut self) -> &mut [u8] {
            self
        }
    }
}

#[cfg(feature = "use_generic_array")]
mod generic_impl {
    use super::Storage;
    use generic_array::{ArrayLength, GenericArray};

    impl<N> Storage for GenericArray<u8, N>
    where
        N: ArrayLength<u8>,
    {
        #[inline(always)]
        fn as_slice(&self) -> &[u8] {
            GenericArray::as_slice(self)
        }

        #[inline(always)]
        fn as_mut_slice(&mut self) -> &mut [u8] {
            GenericArray::as_mut_slice(self)
        }
    }
}
