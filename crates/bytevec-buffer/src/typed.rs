//! Statically typed facade over [`Buffer`] for plain-data elements.
//!
//! [`TypedBuffer<T>`] fixes the element size at compile time and encodes
//! values through the [`Element`] trait, so callers deal in `T` instead of
//! byte slices. Elements are plain data: no destructor is attached, and
//! dropping the buffer simply frees its storage.

use std::fmt;
use std::marker::PhantomData;

use bytevec_core::{BufferConfig, BufferError};
use smallvec::{smallvec, SmallVec};

use crate::buffer::Buffer;

/// Scratch space for encoding one or a few elements without allocating.
type Scratch = SmallVec<[u8; 64]>;

/// A fixed-size plain-data value with a byte encoding.
///
/// `write_bytes` must fill exactly [`SIZE`](Element::SIZE) bytes and
/// `read_bytes` must accept what `write_bytes` produced.
pub trait Element: Copy {
    /// Encoded size in bytes. Must be non-zero.
    const SIZE: usize;

    /// Encode `self` into `out`, which is exactly `SIZE` bytes.
    fn write_bytes(&self, out: &mut [u8]);

    /// Decode a value from exactly `SIZE` bytes.
    fn read_bytes(bytes: &[u8]) -> Self;
}

macro_rules! impl_element_for_primitive {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn write_bytes(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }

                fn read_bytes(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(raw)
                }
            }
        )*
    };
}

impl_element_for_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Growable buffer of `T` values backed by a byte-erased [`Buffer`].
///
/// Same growth, shrink and failure semantics as [`Buffer`].
pub struct TypedBuffer<T: Element> {
    raw: Buffer,
    _marker: PhantomData<T>,
}

impl<T: Element> TypedBuffer<T> {
    /// Empty buffer, default config.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `T::SIZE` is 0.
    pub fn new() -> Result<Self, BufferError> {
        Self::with_config(BufferConfig::default())
    }

    /// Empty buffer with an explicit config.
    ///
    /// # Errors
    ///
    /// As [`Buffer::with_config`].
    pub fn with_config(config: BufferConfig) -> Result<Self, BufferError> {
        Ok(Self {
            raw: Buffer::with_config(config, T::SIZE, None)?,
            _marker: PhantomData,
        })
    }

    /// Empty buffer with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// As [`Buffer::with_capacity`].
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::new()?;
        buffer.raw.reserve(capacity)?;
        Ok(buffer)
    }

    /// Build from a slice, inserting all values with one bulk copy.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn from_slice(values: &[T]) -> Result<Self, BufferError> {
        let mut buffer = Self::new()?;
        if !values.is_empty() {
            buffer.insert_slice(0, values)?;
        }
        Ok(buffer)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// The underlying byte-erased buffer.
    pub fn as_raw(&self) -> &Buffer {
        &self.raw
    }

    /// See [`Buffer::reserve`].
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        self.raw.reserve(min_capacity)
    }

    /// Append a value.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn push(&mut self, value: T) -> Result<(), BufferError> {
        self.raw.push(&encode(&value))
    }

    /// Remove and return the last value.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`].
    pub fn pop(&mut self) -> Result<T, BufferError> {
        let mut out: Scratch = smallvec![0; T::SIZE];
        self.raw.pop(Some(out.as_mut_slice()))?;
        Ok(T::read_bytes(&out))
    }

    /// Value at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`].
    pub fn get(&self, index: usize) -> Result<T, BufferError> {
        let bytes = self.raw.element(index)?;
        Ok(T::read_bytes(&bytes))
    }

    /// Overwrite the value at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`].
    pub fn set(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        self.raw.replace(index, &encode(&value))
    }

    /// Insert a value at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index > len`;
    /// [`BufferError::AllocationFailure`].
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), BufferError> {
        self.raw.insert(index, &encode(&value))
    }

    /// Insert a run of values at `index` with a single tail shift.
    ///
    /// # Errors
    ///
    /// As [`Buffer::insert_many`].
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Result<(), BufferError> {
        let mut bytes: Scratch = smallvec![0; values.len() * T::SIZE];
        for (value, slot) in values.iter().zip(bytes.chunks_exact_mut(T::SIZE)) {
            value.write_bytes(slot);
        }
        self.raw.insert_many(index, &bytes)
    }

    /// Remove and return the value at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`].
    pub fn remove(&mut self, index: usize) -> Result<T, BufferError> {
        let value = self.get(index)?;
        self.raw.remove(index)?;
        Ok(value)
    }

    /// First value.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`].
    pub fn front(&self) -> Result<T, BufferError> {
        let mut out: Scratch = smallvec![0; T::SIZE];
        self.raw.front(&mut out)?;
        Ok(T::read_bytes(&out))
    }

    /// Last value.
    ///
    /// # Errors
    ///
    /// [`BufferError::EmptyCollection`].
    pub fn back(&self) -> Result<T, BufferError> {
        let mut out: Scratch = smallvec![0; T::SIZE];
        self.raw.back(&mut out)?;
        Ok(T::read_bytes(&out))
    }

    /// See [`Buffer::clear`]: storage is freed.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Decode every value into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.raw
            .as_bytes()
            .chunks_exact(T::SIZE)
            .map(T::read_bytes)
            .collect()
    }

    /// Independent copy. Plain-data elements make aliasing harmless.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        Ok(Self {
            raw: self.raw.alias_copy()?,
            _marker: PhantomData,
        })
    }
}

impl<T: Element + fmt::Debug> fmt::Debug for TypedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

fn encode<T: Element>(value: &T) -> Scratch {
    let mut bytes: Scratch = smallvec![0; T::SIZE];
    value.write_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_round_trip_through_buffer() {
        let mut buffer = TypedBuffer::<f64>::new().unwrap();
        buffer.push(1.5).unwrap();
        buffer.push(-2.25).unwrap();
        assert_eq!(buffer.to_vec(), [1.5, -2.25]);
        assert_eq!(buffer.as_raw().element_size(), 8);
    }

    #[test]
    fn typed_operations_mirror_raw_semantics() {
        let mut buffer = TypedBuffer::from_slice(&[1u16, 2, 5]).unwrap();
        buffer.insert_slice(2, &[3, 4]).unwrap();
        assert_eq!(buffer.to_vec(), [1, 2, 3, 4, 5]);
        assert_eq!(buffer.remove(0).unwrap(), 1);
        buffer.set(0, 20).unwrap();
        buffer.insert(0, 10).unwrap();
        assert_eq!(buffer.front().unwrap(), 10);
        assert_eq!(buffer.back().unwrap(), 5);
        assert_eq!(buffer.pop().unwrap(), 5);
        assert_eq!(buffer.get(1).unwrap(), 20);
        assert_eq!(format!("{buffer:?}"), "[10, 20, 3, 4]");
    }

    #[test]
    fn typed_errors_pass_through() {
        let mut buffer = TypedBuffer::<i32>::new().unwrap();
        assert_eq!(buffer.pop(), Err(BufferError::EmptyCollection));
        assert_eq!(
            buffer.get(0),
            Err(BufferError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn try_clone_is_independent() {
        let mut a = TypedBuffer::from_slice(&[1u64, 2, 3]).unwrap();
        let b = a.try_clone().unwrap();
        a.clear();
        assert!(a.is_empty());
        assert_eq!(b.to_vec(), [1, 2, 3]);
    }

    #[test]
    fn with_capacity_reserves() {
        let buffer = TypedBuffer::<u8>::with_capacity(32).unwrap();
        assert_eq!(buffer.capacity(), 32);
        assert!(buffer.is_empty());
    }
}
