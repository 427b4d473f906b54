//! Slot-addressed byte storage backing a [`Buffer`](crate::Buffer).
//!
//! A [`Region`] is a zero-filled `Vec<u8>` whose length is always
//! `capacity * element_size`. Slot `i` is the byte range
//! `[i * element_size, (i + 1) * element_size)`. The region knows nothing
//! about which slots are live; the owning buffer tracks that.

use std::ops::Range;

use bytevec_core::{BufferError, ByteAllocator};

pub(crate) struct Region {
    bytes: Vec<u8>,
    element_size: usize,
}

impl Region {
    /// An empty region with no allocation.
    pub(crate) fn new(element_size: usize) -> Self {
        debug_assert!(element_size > 0);
        Self {
            bytes: Vec::new(),
            element_size,
        }
    }

    pub(crate) fn element_size(&self) -> usize {
        self.element_size
    }

    /// Number of slots currently allocated.
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len() / self.element_size
    }

    /// Reallocate to exactly `slots` slots.
    ///
    /// Slots below `min(old, new)` keep their bytes. On error the region is
    /// unchanged.
    pub(crate) fn resize(
        &mut self,
        slots: usize,
        allocator: &dyn ByteAllocator,
    ) -> Result<(), BufferError> {
        let new_len = slots
            .checked_mul(self.element_size)
            .ok_or(BufferError::AllocationFailure {
                requested_bytes: usize::MAX,
            })?;
        let old_len = self.bytes.len();
        if new_len > old_len {
            allocator.grow(&mut self.bytes, new_len)
        } else if new_len == 0 {
            self.release(allocator);
            Ok(())
        } else if new_len < old_len {
            allocator.shrink(&mut self.bytes, new_len)
        } else {
            Ok(())
        }
    }

    pub(crate) fn release(&mut self, allocator: &dyn ByteAllocator) {
        if self.bytes.capacity() > 0 {
            allocator.release(&mut self.bytes);
        }
    }

    fn span(&self, first: usize, count: usize) -> Range<usize> {
        let start = first * self.element_size;
        start..start + count * self.element_size
    }

    /// Bytes of `count` consecutive slots starting at `first`.
    pub(crate) fn slots(&self, first: usize, count: usize) -> &[u8] {
        let span = self.span(first, count);
        &self.bytes[span]
    }

    pub(crate) fn slots_mut(&mut self, first: usize, count: usize) -> &mut [u8] {
        let span = self.span(first, count);
        &mut self.bytes[span]
    }

    pub(crate) fn slot(&self, index: usize) -> &[u8] {
        self.slots(index, 1)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut [u8] {
        self.slots_mut(index, 1)
    }

    /// Move slots `[from, live)` to `[from + by, live + by)`.
    ///
    /// The caller guarantees `live + by <= capacity`.
    pub(crate) fn shift_right(&mut self, from: usize, live: usize, by: usize) {
        if from < live {
            let src = self.span(from, live - from);
            let dest = (from + by) * self.element_size;
            self.bytes.copy_within(src, dest);
        }
    }

    /// Move slots `[from + by, live)` to `[from, live - by)`.
    pub(crate) fn shift_left(&mut self, from: usize, live: usize, by: usize) {
        if from + by < live {
            let src = self.span(from + by, live - from - by);
            let dest = from * self.element_size;
            self.bytes.copy_within(src, dest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytevec_core::GlobalAllocator;

    fn region_of(element_size: usize, slots: usize) -> Region {
        let mut region = Region::new(element_size);
        region.resize(slots, &GlobalAllocator).unwrap();
        region
    }

    #[test]
    fn new_region_has_no_capacity() {
        let region = Region::new(4);
        assert_eq!(region.capacity(), 0);
        assert_eq!(region.element_size(), 4);
    }

    #[test]
    fn resize_preserves_prefix() {
        let mut region = region_of(2, 2);
        region.slot_mut(0).copy_from_slice(&[1, 2]);
        region.slot_mut(1).copy_from_slice(&[3, 4]);
        region.resize(5, &GlobalAllocator).unwrap();
        assert_eq!(region.capacity(), 5);
        assert_eq!(region.slots(0, 2), &[1, 2, 3, 4]);
        assert_eq!(region.slot(4), &[0, 0]);
        region.resize(1, &GlobalAllocator).unwrap();
        assert_eq!(region.capacity(), 1);
        assert_eq!(region.slot(0), &[1, 2]);
    }

    #[test]
    fn resize_to_zero_releases() {
        let mut region = region_of(8, 3);
        region.resize(0, &GlobalAllocator).unwrap();
        assert_eq!(region.capacity(), 0);
    }

    #[test]
    fn overflowing_slot_count_is_allocation_failure() {
        let mut region = Region::new(16);
        let err = region.resize(usize::MAX, &GlobalAllocator).unwrap_err();
        assert!(matches!(err, BufferError::AllocationFailure { .. }));
        assert_eq!(region.capacity(), 0);
    }

    #[test]
    fn shift_right_opens_a_gap() {
        let mut region = region_of(1, 6);
        region.slots_mut(0, 4).copy_from_slice(&[1, 2, 3, 4]);
        region.shift_right(1, 4, 2);
        assert_eq!(&region.slots(0, 6)[3..], &[2, 3, 4]);
        assert_eq!(region.slot(0), &[1]);
    }

    #[test]
    fn shift_left_closes_a_gap() {
        let mut region = region_of(1, 5);
        region.slots_mut(0, 5).copy_from_slice(&[1, 2, 3, 4, 5]);
        region.shift_left(1, 5, 1);
        assert_eq!(region.slots(0, 4), &[1, 3, 4, 5]);
    }

    #[test]
    fn shift_at_the_end_is_a_no_op() {
        let mut region = region_of(1, 3);
        region.slots_mut(0, 3).copy_from_slice(&[7, 8, 9]);
        region.shift_right(3, 3, 1);
        region.shift_left(2, 3, 1);
        assert_eq!(region.slots(0, 3), &[7, 8, 9]);
    }
}
