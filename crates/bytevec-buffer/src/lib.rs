//! Type-erased growable buffer.
//!
//! A [`Buffer`] stores elements of a fixed, runtime-chosen byte size in one
//! contiguous region. It owns that region exclusively, grows it
//! geometrically on insertion, shrinks it after removals, and runs an
//! optional per-element [`Destructor`] before any element's bytes are
//! overwritten or freed.
//!
//! # Architecture
//!
//! ```text
//! Buffer
//! ├── Region (Vec<u8>, capacity * element_size bytes, zero-filled)
//! ├── Destructor (optional, shared by aliasing copies)
//! └── BufferConfig (GrowthPolicy + allocator + diagnostic sink)
//!
//! TypedBuffer<T: Element>  (plain-data facade over a Buffer)
//! ```
//!
//! Every mutation of the region's size goes through the configured
//! [`ByteAllocator`](bytevec_core::ByteAllocator); every precondition
//! violation is reported to the configured
//! [`DiagnosticSink`](bytevec_core::DiagnosticSink) and returned as a
//! [`BufferError`](bytevec_core::BufferError).
//!
//! Buffers are single-threaded (`!Send`, `!Sync`). Callers that need
//! shared access wrap the whole buffer in their own lock.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod destructor;
mod region;
pub mod typed;

pub use buffer::{Buffer, ElementBytes};
pub use destructor::Destructor;
pub use typed::{Element, TypedBuffer};
