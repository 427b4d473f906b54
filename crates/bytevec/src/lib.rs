//! bytevec: type-erased growable buffers and zero-terminated byte strings.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all bytevec sub-crates. For most users, adding `bytevec` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use bytevec::prelude::*;
//!
//! // A buffer of 4-byte elements.
//! let mut buffer = Buffer::new(4, None).unwrap();
//! for value in [10u32, 20, 30] {
//!     buffer.push(&value.to_ne_bytes()).unwrap();
//! }
//! let mut out = [0u8; 4];
//! buffer.get(1, &mut out).unwrap();
//! assert_eq!(u32::from_ne_bytes(out), 20);
//!
//! // The same through the typed facade.
//! let typed = TypedBuffer::from_slice(&[10u32, 20, 30]).unwrap();
//! assert_eq!(typed.get(1).unwrap(), 20);
//!
//! // Zero-terminated text.
//! let mut text = Text::from_bytes(b"Hello, ").unwrap();
//! text.append_text(&Text::from_bytes(b"World!").unwrap()).unwrap();
//! assert_eq!(text.len(), 13);
//! assert_eq!(text.find_bytes(b"World"), Some(7));
//! assert_eq!(text.as_bytes().last(), Some(&0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `bytevec-core` | Errors, growth policy, allocator and diagnostic traits |
//! | [`buffer`] | `bytevec-buffer` | `Buffer`, `Destructor`, `TypedBuffer` |
//! | [`text`] | `bytevec-text` | `Text`, byte search, quoted display |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Errors, configuration, allocator and diagnostics (`bytevec-core`).
///
/// [`types::BufferConfig`] bundles the [`types::GrowthPolicy`] with the
/// [`types::ByteAllocator`] and [`types::DiagnosticSink`] a buffer uses.
pub use bytevec_core as types;

/// The byte-erased buffer and its typed facade (`bytevec-buffer`).
pub use bytevec_buffer as buffer;

/// Zero-terminated byte strings (`bytevec-text`).
pub use bytevec_text as text;

/// Common imports for typical bytevec usage.
///
/// ```rust
/// use bytevec::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use bytevec_buffer::{Buffer, Destructor, Element, TypedBuffer};
    pub use bytevec_text::Text;

    // Configuration
    pub use bytevec_core::{BufferConfig, GrowthPolicy};

    // Errors
    pub use bytevec_core::{BufferError, ErrorKind};
}
