//! Zero-terminated byte strings.
//!
//! [`Text`] is a [`Buffer`](bytevec_buffer::Buffer) of one-byte elements
//! that always ends in a single `0x00`, so its bytes can be handed to
//! consumers expecting a C string at any time via [`Text::as_c_str`].
//! Content is raw bytes; no encoding is assumed or checked.
//!
//! Appends go through the buffer's bulk insert path: building a text from
//! many fragments costs one tail shift per fragment, not one per byte.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod display;
pub mod search;
pub mod text;

pub use display::Quoted;
pub use text::Text;
