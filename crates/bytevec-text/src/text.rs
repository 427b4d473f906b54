//! The zero-terminated [`Text`] type.

use std::cmp::Ordering;
use std::ffi::CStr;
use std::fmt;

use bytevec_buffer::Buffer;
use bytevec_core::{BufferConfig, BufferError, Diagnostic};

use crate::display::{write_escaped, Quoted};
use crate::search::{find_byte, find_subslice};

const TERMINATOR: u8 = 0;

/// A growable byte string whose backing buffer always ends in one `0x00`.
///
/// The logical content ([`content`](Text::content)) never contains a zero
/// byte; operations that would introduce one fail with
/// [`BufferError::InvalidArgument`]. [`as_bytes`](Text::as_bytes) is the
/// content followed by the terminator.
///
/// The only state without a terminator is a text whose storage could not be
/// re-allocated after [`clear`](Text::clear). Such a text is empty, reports
/// length 0, and re-terminates on its next successful mutation.
///
/// Errors raised by the text itself are reported under operation names
/// prefixed with `text.`; allocation failures are reported by the backing
/// buffer.
pub struct Text {
    raw: Buffer,
}

impl Text {
    /// Empty text with the default config.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if the terminator cannot be stored.
    pub fn new() -> Result<Self, BufferError> {
        Self::with_config(BufferConfig::default())
    }

    /// Empty text with an explicit config.
    ///
    /// # Errors
    ///
    /// As [`Buffer::with_config`], plus [`BufferError::AllocationFailure`].
    pub fn with_config(config: BufferConfig) -> Result<Self, BufferError> {
        let mut text = Self {
            raw: Buffer::with_config(config, 1, None)?,
        };
        text.ensure_terminated()?;
        Ok(text)
    }

    /// Text holding a copy of `source`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `source` contains a zero byte;
    /// [`BufferError::AllocationFailure`].
    pub fn from_bytes(source: &[u8]) -> Result<Self, BufferError> {
        let mut text = Self::new()?;
        text.checked_splice("text.from_bytes", 0, source)?;
        Ok(text)
    }

    /// Independent copy of `other`, sharing its config.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn from_text(other: &Text) -> Result<Self, BufferError> {
        let mut text = Self::with_config(other.raw.config().clone())?;
        text.append_text(other)?;
        Ok(text)
    }

    /// Make room for at least `capacity` content bytes plus the terminator.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn reserve(&mut self, capacity: usize) -> Result<(), BufferError> {
        let Some(slots) = capacity.checked_add(1) else {
            return self.fail(
                "text.reserve",
                BufferError::AllocationFailure {
                    requested_bytes: usize::MAX,
                },
            );
        };
        self.raw.reserve(slots)?;
        self.ensure_terminated()
    }

    /// Number of content bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.raw.len().saturating_sub(1)
    }

    /// Whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Content bytes that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.raw.capacity().saturating_sub(1)
    }

    /// The config this text was created with.
    pub fn config(&self) -> &BufferConfig {
        self.raw.config()
    }

    /// Content followed by the terminator.
    ///
    /// Empty only in the unallocated state described on [`Text`].
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    /// Content without the terminator.
    pub fn content(&self) -> &[u8] {
        let bytes = self.raw.as_bytes();
        &bytes[..bytes.len().saturating_sub(1)]
    }

    /// The text as a C string.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_with_nul(self.as_bytes()).unwrap_or_default()
    }

    /// Append `source`. A no-op when `source` is empty.
    ///
    /// The terminator's slot becomes the insertion point, so the bytes go
    /// in with one bulk insert.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `source` contains a zero byte;
    /// [`BufferError::AllocationFailure`]. The text is unchanged on error.
    pub fn append_bytes(&mut self, source: &[u8]) -> Result<(), BufferError> {
        self.checked_splice("text.append_bytes", self.len(), source)
    }

    /// Append the content of `other`.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn append_text(&mut self, other: &Text) -> Result<(), BufferError> {
        self.splice(self.len(), other.content())
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidArgument`] if `byte` is zero;
    /// [`BufferError::AllocationFailure`].
    pub fn append_char(&mut self, byte: u8) -> Result<(), BufferError> {
        self.checked_splice("text.append_char", self.len(), &[byte])
    }

    /// Insert one byte before position `index`; appends if
    /// `index >= len()`.
    ///
    /// # Errors
    ///
    /// As [`append_char`](Text::append_char).
    pub fn insert_char(&mut self, index: usize, byte: u8) -> Result<(), BufferError> {
        self.checked_splice("text.insert_char", index, &[byte])
    }

    /// Insert `source` before position `index`; appends if
    /// `index >= len()`.
    ///
    /// # Errors
    ///
    /// As [`append_bytes`](Text::append_bytes).
    pub fn insert_bytes(&mut self, index: usize, source: &[u8]) -> Result<(), BufferError> {
        self.checked_splice("text.insert_bytes", index, source)
    }

    /// Insert the content of `other` before position `index`; appends if
    /// `index >= len()`.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`].
    pub fn insert_text(&mut self, index: usize, other: &Text) -> Result<(), BufferError> {
        self.splice(index, other.content())
    }

    /// Remove and return the byte at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len()`.
    pub fn remove_char(&mut self, index: usize) -> Result<u8, BufferError> {
        let byte = self.char_at_for("text.remove_char", index)?;
        self.raw.remove(index)?;
        Ok(byte)
    }

    /// Remove all content and free the storage, then store a fresh
    /// terminator.
    ///
    /// If the terminator cannot be allocated, the failure is reported by
    /// the backing buffer and the text is left empty and unallocated.
    pub fn clear(&mut self) {
        self.raw.clear();
        if self.ensure_terminated().is_err() {
            tracing::debug!("text left unallocated after clear");
        }
    }

    /// Byte at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len()`.
    pub fn char_at(&self, index: usize) -> Result<u8, BufferError> {
        self.char_at_for("text.char_at", index)
    }

    /// Overwrite the byte at `index`.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `index >= len()`;
    /// [`BufferError::InvalidArgument`] if `byte` is zero.
    pub fn set_char(&mut self, index: usize, byte: u8) -> Result<(), BufferError> {
        self.char_at_for("text.set_char", index)?;
        self.check_content("text.set_char", &[byte])?;
        self.raw.replace(index, &[byte])
    }

    /// Lexicographic byte comparison of the two contents.
    pub fn compare(&self, other: &Text) -> Ordering {
        self.content().cmp(other.content())
    }

    /// Whether both texts hold the same content.
    pub fn equals(&self, other: &Text) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Whether the content equals `bytes`.
    pub fn equals_bytes(&self, bytes: &[u8]) -> bool {
        self.content() == bytes
    }

    /// Index of the first occurrence of `byte`.
    pub fn find_char(&self, byte: u8) -> Option<usize> {
        find_byte(self.content(), byte)
    }

    /// Index of the first occurrence of `pattern`. An empty pattern is
    /// found at 0.
    pub fn find_bytes(&self, pattern: &[u8]) -> Option<usize> {
        find_subslice(self.content(), pattern)
    }

    /// New text holding up to `length` bytes starting at `start`.
    ///
    /// The end is clamped to `len()`; a zero `length` yields an empty
    /// text. The result shares this text's config.
    ///
    /// # Errors
    ///
    /// [`BufferError::IndexOutOfBounds`] if `start >= len()`;
    /// [`BufferError::AllocationFailure`].
    pub fn substring(&self, start: usize, length: usize) -> Result<Text, BufferError> {
        let len = self.len();
        if start >= len {
            return self.fail(
                "text.substring",
                BufferError::IndexOutOfBounds { index: start, len },
            );
        }
        let end = start.saturating_add(length).min(len);
        let mut text = Self::with_config(self.raw.config().clone())?;
        text.splice(0, &self.content()[start..end])?;
        Ok(text)
    }

    /// The content wrapped in double quotes.
    pub fn display(&self) -> Quoted<'_> {
        Quoted(self.content())
    }

    /// Store a terminator if the backing buffer lacks one.
    fn ensure_terminated(&mut self) -> Result<(), BufferError> {
        if self.raw.as_bytes().last() == Some(&TERMINATOR) {
            return Ok(());
        }
        self.raw.push(&[TERMINATOR])
    }

    /// Validate `bytes` as content, then splice it in.
    fn checked_splice(
        &mut self,
        operation: &'static str,
        index: usize,
        bytes: &[u8],
    ) -> Result<(), BufferError> {
        self.check_content(operation, bytes)?;
        self.splice(index, bytes)
    }

    /// Insert known-good content before `index`, clamped to an append.
    ///
    /// With the terminator in place the insert lands at or before its slot,
    /// so the terminator stays last and a failed insert changes nothing.
    fn splice(&mut self, index: usize, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.ensure_terminated()?;
        let index = index.min(self.len());
        match bytes {
            [byte] => self.raw.insert(index, &[*byte]),
            _ => self.raw.insert_many(index, bytes),
        }
    }

    fn char_at_for(&self, operation: &'static str, index: usize) -> Result<u8, BufferError> {
        let len = self.len();
        if index >= len {
            return self.fail(operation, BufferError::IndexOutOfBounds { index, len });
        }
        Ok(self.content()[index])
    }

    fn check_content(&self, operation: &'static str, bytes: &[u8]) -> Result<(), BufferError> {
        if let Some(at) = find_byte(bytes, TERMINATOR) {
            return self.fail(
                operation,
                BufferError::invalid(format!("zero byte at offset {at} in text content")),
            );
        }
        Ok(())
    }

    fn fail<T>(&self, operation: &'static str, error: BufferError) -> Result<T, BufferError> {
        self.raw.config().diagnostics.report(&Diagnostic {
            operation,
            error: &error,
        });
        Err(error)
    }
}

impl TryFrom<&[u8]> for Text {
    type Error = BufferError;

    fn try_from(source: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(source)
    }
}

impl TryFrom<&str> for Text {
    type Error = BufferError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(source.as_bytes())
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Text {}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialEq<[u8]> for Text {
    fn eq(&self, other: &[u8]) -> bool {
        self.equals_bytes(other)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.equals_bytes(other.as_bytes())
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.equals_bytes(other.as_bytes())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({})", self.display())
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, self.content())
    }
}
