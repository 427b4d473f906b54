//! Error types shared by every bytevec container.
//!
//! One enum covers the four failure categories a buffer can report. Each
//! variant carries enough context to render a useful diagnostic without
//! access to the buffer that produced it.

use std::error::Error;
use std::fmt;

/// Errors returned by buffer and text operations.
///
/// Every fallible operation validates its preconditions before touching
/// storage, so receiving one of these means the container is unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// A required input was unusable: zero element size, an element slice
    /// of the wrong length, a zero-count fill, or an interior zero byte
    /// handed to a text.
    InvalidArgument {
        /// Human-readable description of the rejected input.
        reason: String,
    },
    /// An index was past the end of the live elements (or past `len` for
    /// insertion points).
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },
    /// `pop`, `front` or `back` on a container with no elements.
    EmptyCollection,
    /// The allocator refused to grow, shrink or create the backing region.
    AllocationFailure {
        /// Size of the region that was requested, in bytes.
        requested_bytes: usize,
    },
}

/// Fieldless category of a [`BufferError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`BufferError::InvalidArgument`].
    InvalidArgument,
    /// See [`BufferError::IndexOutOfBounds`].
    IndexOutOfBounds,
    /// See [`BufferError::EmptyCollection`].
    EmptyCollection,
    /// See [`BufferError::AllocationFailure`].
    AllocationFailure,
}

impl BufferError {
    /// Shorthand for [`BufferError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::IndexOutOfBounds { .. } => ErrorKind::IndexOutOfBounds,
            Self::EmptyCollection => ErrorKind::EmptyCollection,
            Self::AllocationFailure { .. } => ErrorKind::AllocationFailure,
        }
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::EmptyCollection => write!(f, "collection is empty"),
            Self::AllocationFailure { requested_bytes } => {
                write!(f, "allocation of {requested_bytes} bytes failed")
            }
        }
    }
}

impl Error for BufferError {}
