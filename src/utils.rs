#[inline]
pub fn wrap_add(index: usize, addend: usize, size: usize) -> usize {
    debug_assert!(index < size);
    (index + addend % size) % size
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, size: usize) -> usize {
    debug_assert!(index < size);
    (index + size - subtrahend % size) % size
}

/// Number of valid bytes in `[tail, head)` modulo `size`.
#[inline]
pub fn count(tail: usize, head: usize, size: usize) -> usize {
    debug_assert!(head < size);
    debug_assert!(tail < size);
    if head < tail {
        size - tail + head
    } else {
        head - tail
    }
}

/// Free slots left, excluding the reserved one.
#[inline]
pub fn free(tail: usize, head: usize, size: usize) -> usize {
    debug_assert!(head < size);
    debug_assert!(tail < size);
    if head < tail {
        tail - head - 1
    } else {
        size - head + tail - 1
    }
}
