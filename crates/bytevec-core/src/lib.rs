//! Core types for the bytevec workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! collaborators every buffer is built from: the error type, the
//! capacity growth/shrink policy, the byte allocator abstraction and the
//! diagnostic sink that receives precondition violations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod diag;
pub mod error;

pub use alloc::{ByteAllocator, GlobalAllocator};
pub use config::{BufferConfig, GrowthPolicy};
pub use diag::{Diagnostic, DiagnosticSink, SilentSink, TracingSink};
pub use error::{BufferError, ErrorKind};
