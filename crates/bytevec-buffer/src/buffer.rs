//! The type-erased growable [`Buffer`].

use std::fmt;

use bytevec_core::{BufferConfig, BufferError, Diagnostic};
use smallvec::SmallVec;

use crate::destructor::Destructor;
use crate::region::Region;

/// Owned copy of one element's bytes.
///
/// Elements up to 16 bytes are returned without a heap allocation.
pub type ElementBytes = SmallVec<[u8; 16]>;

/// A growable contiguous sequence of fixed-size, byte-erased elements.
///
/// All elements occupy exactly [`element_size`](Buffer::element_size)
/// bytes; element `i` lives at byte offset `i * element_size` of the
/// backing region. Inputs and out-parameters are byte slices that must be
/// exactly one element long (or a whole number of elements for
/// [`insert_many`](Buffer::insert_many)).
///
/// # Destructor
///
/// When a [`Destructor`] is attached it runs once per element right
/// before that element's bytes are overwritten or freed: on
/// [`replace`](Buffer::replace), [`remove`](Buffer::remove),
/// [`pop`](Buffer::pop) without an out-parameter,
/// [`clear`](Buffer::clear), [`truncate`](Buffer::truncate) and drop.
/// `pop` with an out-parameter hands ownership of the bytes to the caller
/// instead and does not run it.
///
/// # Failure
///
/// Every fallible operation checks its preconditions first. On error the
/// buffer is unchanged, the error is reported to the config's diagnostic
/// sink, and then returned.
pub struct Buffer {
    region: Region,
    len: usize,
    destructor: Option<Destructor>,
    config: BufferConfig,
}

impl Buffer {
    /// Create an empty buffer with no allocation, using the default config.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `element_size` is 0.
    pub fn new(element_size: usize, destructor: Option<Destructor>) -> Result<Self, BufferError> {
        Self::with_config(BufferConfig::default(), element_size, destructor)
    }

    /// Create an empty buffer with an explicit config.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `element_size` is 0 or the
    /// config's policy fails validation.
    pub fn with_config(
        config: BufferConfig,
        element_size: usize,
        destructor: Option<Destructor>,
    ) -> Result<Self, BufferError> {
        let rejected = if element_size == 0 {
            Some(BufferError::invalid("element_size must be > 0"))
        } else {
            config.validate().err()
        };
        if let Some(error) = rejected {
            config.diagnostics.report(&Diagnostic {
                operation: "create",
                error: &error,
            });
            return Err(error);
        }
        Ok(Self {
            region: Region::new(element_size),
            len: 0,
            destructor,
            config,
        })
    }

    /// Create an empty buffer with exactly `capacity` pre-allocated slots.
    ///
    /// # Errors
    ///
    /// As [`Buffer::new`], plus [`BufferError::AllocationFailure`].
    pub fn with_capacity(
        capacity: usize,
        element_size: usize,
        destructor: Option<Destructor>,
    ) -> Result<Self, BufferError> {
        let mut buffer = Self::new(element_size, destructor)?;
        buffer.reserve(capacity)?;
        Ok(buffer)
    }

    /// Create a buffer holding `count` copies of `value`.
    ///
    /// Capacity is exactly `count`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `count` is 0 or `value` is not
    /// one element long; [`BufferError::AllocationFailure`].
    pub fn filled(
        count: usize,
        element_size: usize,
        destructor: Option<Destructor>,
        value: &[u8],
    ) -> Result<Self, BufferError> {
        let mut buffer = Self::new(element_size, destructor)?;
        if count == 0 {
            return buffer.fail("filled", BufferError::invalid("fill count must be > 0"));
        }
        buffer.check_element("filled", value)?;
        buffer.reserve(count)?;
        for index in 0..count {
            buffer.region.slot_mut(index).copy_from_slice(value);
        }
        buffer.len = count;
        Ok(buffer)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated element slots.
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Size of every element in bytes. Fixed for the buffer's lifetime.
    pub fn element_size(&self) -> usize {
        self.region.element_size()
    }

    /// The config this buffer was created with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// The attached destructor, if any.
    pub fn destructor(&self) -> Option<&Destructor> {
        self.destructor.as_ref()
    }

    /// Read-only view of all live elements, back to back.
    pub fn as_bytes(&self) -> &[u8] {
        self.region.slots(0, self.len)
    }

    /// Grow storage to at least `min_capacity` slots.
    ///
    /// Never shrinks; a no-op when the capacity is already sufficient.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`], with the buffer unchanged.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        if min_capacity <= self.capacity() {
            return Ok(());
        }
        self.resize_storage("reserve", min_capacity)
    }

    /// Append one element, growing first if the buffer is full.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `element` is not one element
    /// long; [`BufferError::AllocationFailure`].
    pub fn push(&mut self, element: &[u8]) -> Result<(), BufferError> {
        self.check_element("push", element)?;
        self.grow_for("push", self.len + 1)?;
        self.region.slot_mut(self.len).copy_from_slice(element);
        self.len += 1;
        Ok(())
    }

    /// Remove the last element.
    ///
    /// With `out`, the element's bytes are copied there and the destructor
    /// is not run: ownership moves to the caller. Without `out`, the
    /// destructor runs on the element. A shrink check follows.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`]; [`BufferError::InvalidArgument`]
    /// if `out` is not one element long.
    pub fn pop(&mut self, out: Option<&mut [u8]>) -> Result<(), BufferError> {
        if self.len == 0 {
            return self.fail("pop", BufferError::EmptyCollection);
        }
        let last = self.len - 1;
        match out {
            Some(out) => {
                self.check_out("pop", out)?;
                out.copy_from_slice(self.region.slot(last));
            }
            None => self.destroy_slot(last),
        }
        self.len = last;
        self.shrink_after_removal("pop");
        Ok(())
    }

    /// Copy element `index` into `out`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len`;
    /// [`BufferError::InvalidArgument`] if `out` is not one element long.
    pub fn get(&self, index: usize, out: &mut [u8]) -> Result<(), BufferError> {
        self.check_index("get", index)?;
        self.check_out("get", out)?;
        out.copy_from_slice(self.region.slot(index));
        Ok(())
    }

    /// Owned copy of element `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len`.
    pub fn element(&self, index: usize) -> Result<ElementBytes, BufferError> {
        self.check_index("element", index)?;
        Ok(SmallVec::from_slice(self.region.slot(index)))
    }

    /// Overwrite element `index`, running the destructor on the old value.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`]; [`BufferError::InvalidArgument`]
    /// if `element` is not one element long.
    pub fn replace(&mut self, index: usize, element: &[u8]) -> Result<(), BufferError> {
        self.check_index("replace", index)?;
        self.check_element("replace", element)?;
        self.destroy_slot(index);
        self.region.slot_mut(index).copy_from_slice(element);
        Ok(())
    }

    /// Insert one element at `index`, shifting the tail right by one.
    ///
    /// `index == len` appends. O(len - index).
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index > len`;
    /// [`BufferError::InvalidArgument`]; [`BufferError::AllocationFailure`].
    pub fn insert(&mut self, index: usize, element: &[u8]) -> Result<(), BufferError> {
        self.check_insertion_point("insert", index)?;
        self.check_element("insert", element)?;
        self.grow_for("insert", self.len + 1)?;
        self.region.shift_right(index, self.len, 1);
        self.region.slot_mut(index).copy_from_slice(element);
        self.len += 1;
        Ok(())
    }

    /// Insert a run of elements at `index` with a single tail shift.
    ///
    /// `elements` holds `count` elements back to back, where
    /// `count = elements.len() / element_size`. Storage is grown at most
    /// once, the tail is moved once, and the run is copied in one block,
    /// so the cost is O(len - index + count) regardless of `count`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `elements` is empty or not a
    /// whole number of elements; [`BufferError::IndexOutOfBounds`] if
    /// `index > len`; [`BufferError::AllocationFailure`].
    pub fn insert_many(&mut self, index: usize, elements: &[u8]) -> Result<(), BufferError> {
        let element_size = self.element_size();
        if elements.is_empty() || elements.len() % element_size != 0 {
            return self.fail(
                "insert_many",
                BufferError::invalid(format!(
                    "expected a non-empty multiple of {element_size} bytes, got {}",
                    elements.len()
                )),
            );
        }
        self.check_insertion_point("insert_many", index)?;
        let count = elements.len() / element_size;
        let required = match self.len.checked_add(count) {
            Some(required) => required,
            None => {
                return self.fail(
                    "insert_many",
                    BufferError::AllocationFailure {
                        requested_bytes: usize::MAX,
                    },
                )
            }
        };
        self.grow_for("insert_many", required)?;
        self.region.shift_right(index, self.len, count);
        self.region.slots_mut(index, count).copy_from_slice(elements);
        self.len = required;
        Ok(())
    }

    /// Remove element `index`, running the destructor on it and shifting
    /// the tail left by one. A shrink check follows.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<(), BufferError> {
        self.check_index("remove", index)?;
        self.destroy_slot(index);
        self.region.shift_left(index, self.len, 1);
        self.len -= 1;
        self.shrink_after_removal("remove");
        Ok(())
    }

    /// Destroy every element in index order and free the storage.
    ///
    /// Length and capacity both become 0; the next insertion grows from
    /// scratch. Use [`clear_retaining_capacity`](Buffer::clear_retaining_capacity)
    /// to keep the allocation for reuse.
    pub fn clear(&mut self) {
        self.destroy_range(0, self.len);
        self.len = 0;
        let old = self.capacity();
        self.region.release(&*self.config.allocator);
        if old > 0 {
            tracing::trace!(operation = "clear", from = old, to = 0, "released buffer storage");
        }
    }

    /// Destroy every element in index order but keep the allocation.
    pub fn clear_retaining_capacity(&mut self) {
        self.destroy_range(0, self.len);
        self.len = 0;
    }

    /// Destroy the elements at `new_len..len` in index order and shorten
    /// the buffer. A no-op when `new_len >= len`. Capacity is untouched.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        self.destroy_range(new_len, self.len);
        self.len = new_len;
    }

    /// Copy the first element into `out`.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`]; [`BufferError::InvalidArgument`].
    pub fn front(&self, out: &mut [u8]) -> Result<(), BufferError> {
        if self.len == 0 {
            return self.fail("front", BufferError::EmptyCollection);
        }
        self.check_out("front", out)?;
        out.copy_from_slice(self.region.slot(0));
        Ok(())
    }

    /// Copy the last element into `out`.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`]; [`BufferError::InvalidArgument`].
    pub fn back(&self, out: &mut [u8]) -> Result<(), BufferError> {
        if self.len == 0 {
            return self.fail("back", BufferError::EmptyCollection);
        }
        self.check_out("back", out)?;
        out.copy_from_slice(self.region.slot(self.len - 1));
        Ok(())
    }

    /// Byte-for-byte duplicate sharing this buffer's destructor and config.
    ///
    /// **Aliasing hazard:** if elements are handles to other resources
    /// (indices into a table, keys, encoded pointers), both buffers now
    /// refer to the same resources, and both will run the destructor on
    /// them. Use [`deep_copy`](Buffer::deep_copy) when elements own
    /// something.
    ///
    /// The copy's capacity equals this buffer's length.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn alias_copy(&self) -> Result<Self, BufferError> {
        let mut copy = self.empty_like()?;
        copy.reserve(self.len)?;
        copy.region
            .slots_mut(0, self.len)
            .copy_from_slice(self.as_bytes());
        copy.len = self.len;
        Ok(copy)
    }

    /// Duplicate every element through `duplicate(source, dest)`.
    ///
    /// `dest` is a zeroed slot of the new buffer; the callback is expected
    /// to fill it with an independently owned copy of `source`. Elements
    /// are visited in index order. The copy shares this buffer's
    /// destructor and config; its capacity equals this buffer's length.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn deep_copy(
        &self,
        mut duplicate: impl FnMut(&[u8], &mut [u8]),
    ) -> Result<Self, BufferError> {
        let mut copy = self.empty_like()?;
        copy.reserve(self.len)?;
        for index in 0..self.len {
            duplicate(self.region.slot(index), copy.region.slot_mut(index));
            copy.len = index + 1;
        }
        Ok(copy)
    }

    /// Run the destructor over all elements and free the storage.
    ///
    /// Equivalent to dropping the buffer; consuming `self` makes a second
    /// destroy impossible.
    pub fn destroy(self) {
        drop(self);
    }

    /// Write `[ e0 e1 … ]` followed by `Size:` and `Capacity:` lines.
    ///
    /// `format_element` is called once per element, in index order, with
    /// read-only access to its bytes.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out` or `format_element`.
    pub fn print<W: fmt::Write>(
        &self,
        out: &mut W,
        mut format_element: impl FnMut(&mut W, &[u8]) -> fmt::Result,
    ) -> fmt::Result {
        out.write_str("[ ")?;
        for index in 0..self.len {
            format_element(out, self.region.slot(index))?;
            out.write_char(' ')?;
        }
        writeln!(out, "]")?;
        writeln!(out, "Size: {}", self.len)?;
        writeln!(out, "Capacity: {}", self.capacity())
    }

    fn empty_like(&self) -> Result<Self, BufferError> {
        Self::with_config(
            self.config.clone(),
            self.element_size(),
            self.destructor.clone(),
        )
    }

    /// Report `error` to the diagnostic sink and return it.
    fn fail<T>(&self, operation: &'static str, error: BufferError) -> Result<T, BufferError> {
        self.config.diagnostics.report(&Diagnostic {
            operation,
            error: &error,
        });
        Err(error)
    }

    fn check_index(&self, operation: &'static str, index: usize) -> Result<(), BufferError> {
        if index >= self.len {
            return self.fail(
                operation,
                BufferError::IndexOutOfBounds {
                    index,
                    len: self.len,
                },
            );
        }
        Ok(())
    }

    fn check_insertion_point(
        &self,
        operation: &'static str,
        index: usize,
    ) -> Result<(), BufferError> {
        if index > self.len {
            return self.fail(
                operation,
                BufferError::IndexOutOfBounds {
                    index,
                    len: self.len,
                },
            );
        }
        Ok(())
    }

    fn check_element(&self, operation: &'static str, element: &[u8]) -> Result<(), BufferError> {
        if element.len() != self.element_size() {
            return self.fail(
                operation,
                BufferError::invalid(format!(
                    "element is {} bytes, expected {}",
                    element.len(),
                    self.element_size()
                )),
            );
        }
        Ok(())
    }

    fn check_out(&self, operation: &'static str, out: &[u8]) -> Result<(), BufferError> {
        if out.len() != self.element_size() {
            return self.fail(
                operation,
                BufferError::invalid(format!(
                    "output slot is {} bytes, expected {}",
                    out.len(),
                    self.element_size()
                )),
            );
        }
        Ok(())
    }

    fn destroy_slot(&mut self, index: usize) {
        if let Some(destructor) = &self.destructor {
            destructor.run(self.region.slot_mut(index));
        }
    }

    fn destroy_range(&mut self, start: usize, end: usize) {
        if let Some(destructor) = &self.destructor {
            for index in start..end {
                destructor.run(self.region.slot_mut(index));
            }
        }
    }

    /// Make room for `required` live elements using the growth policy.
    fn grow_for(&mut self, operation: &'static str, required: usize) -> Result<(), BufferError> {
        let capacity = self.capacity();
        if required <= capacity {
            return Ok(());
        }
        let target = self.config.policy.grown_capacity(capacity).max(required);
        self.resize_storage(operation, target)
    }

    /// Apply the shrink policy after a removal.
    ///
    /// A refused shrink is reported to the diagnostic sink only: the
    /// removal itself succeeded and the capacity stays as it was.
    fn shrink_after_removal(&mut self, operation: &'static str) {
        if let Some(target) = self
            .config
            .policy
            .shrunk_capacity(self.len, self.capacity())
        {
            let _ = self.resize_storage(operation, target);
        }
    }

    fn resize_storage(&mut self, operation: &'static str, slots: usize) -> Result<(), BufferError> {
        let old = self.capacity();
        match self.region.resize(slots, &*self.config.allocator) {
            Ok(()) => {
                tracing::trace!(operation, from = old, to = slots, "resized buffer storage");
                Ok(())
            }
            Err(error) => self.fail(operation, error),
        }
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.destroy_range(0, self.len);
        self.len = 0;
        self.region.release(&*self.config.allocator);
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("element_size", &self.element_size())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("destructor", &self.destructor.is_some())
            .finish()
    }
}
