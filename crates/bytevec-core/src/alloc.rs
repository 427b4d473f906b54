//! Byte-region allocator abstraction.
//!
//! A buffer never calls into the heap directly. Every change to the size
//! of its backing region goes through a [`ByteAllocator`], which either
//! completes the change or reports [`BufferError::AllocationFailure`]
//! with the region untouched.
//!
//! Regions are plain `Vec<u8>` whose length is the allocated byte count.
//! New bytes are zero-filled, so reading a slot that was never written
//! yields zeroes rather than stale memory.

use crate::error::BufferError;

/// Grow, shrink and release contiguous byte regions.
///
/// Implementations must leave `region` exactly as it was when they return
/// an error.
pub trait ByteAllocator {
    /// Extend `region` to `new_len` bytes, zero-filling the new tail.
    ///
    /// `new_len` is always greater than `region.len()`.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if the memory is unavailable.
    fn grow(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError>;

    /// Cut `region` down to `new_len` bytes and return the excess memory.
    ///
    /// `new_len` is always smaller than `region.len()`.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if the allocator refuses to
    /// reallocate.
    fn shrink(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError>;

    /// Free the whole region, leaving it empty with no allocation.
    fn release(&self, region: &mut Vec<u8>);
}

/// The process-wide heap, via `Vec`'s fallible reservation API.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalAllocator;

impl ByteAllocator for GlobalAllocator {
    fn grow(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError> {
        let additional = new_len.saturating_sub(region.len());
        region
            .try_reserve_exact(additional)
            .map_err(|_| BufferError::AllocationFailure {
                requested_bytes: new_len,
            })?;
        region.resize(new_len, 0);
        Ok(())
    }

    fn shrink(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError> {
        region.truncate(new_len);
        region.shrink_to_fit();
        Ok(())
    }

    fn release(&self, region: &mut Vec<u8>) {
        *region = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_zero_fills_new_tail() {
        let mut region = vec![7u8; 3];
        GlobalAllocator.grow(&mut region, 8).unwrap();
        assert_eq!(region, [7, 7, 7, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn shrink_keeps_prefix() {
        let mut region = vec![1u8, 2, 3, 4];
        GlobalAllocator.shrink(&mut region, 2).unwrap();
        assert_eq!(region, [1, 2]);
    }

    #[test]
    fn release_drops_allocation() {
        let mut region = vec![1u8; 32];
        GlobalAllocator.release(&mut region);
        assert!(region.is_empty());
        assert_eq!(region.capacity(), 0);
    }

    #[test]
    fn impossible_grow_is_reported_not_fatal() {
        let mut region = vec![9u8; 4];
        let err = GlobalAllocator.grow(&mut region, usize::MAX).unwrap_err();
        assert_eq!(
            err,
            BufferError::AllocationFailure {
                requested_bytes: usize::MAX
            }
        );
        assert_eq!(region, [9, 9, 9, 9]);
    }
}
