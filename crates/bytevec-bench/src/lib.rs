//! Benchmark inputs for the bytevec containers.
//!
//! - [`bench_config`]: default growth policy, diagnostics discarded
//! - [`element_run`]: `count` back-to-back elements for bulk inserts
//! - [`fragments`]: deterministic zero-free text fragments

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use bytevec_core::{BufferConfig, SilentSink};

/// Default config with diagnostics discarded, so failures never reach a
/// tracing subscriber mid-measurement.
pub fn bench_config() -> BufferConfig {
    BufferConfig::default().with_diagnostics(Rc::new(SilentSink))
}

/// `count` elements of `element_size` bytes, element `i` filled with
/// `i as u8`.
pub fn element_run(count: usize, element_size: usize) -> Vec<u8> {
    (0..count)
        .flat_map(|i| std::iter::repeat_n(i as u8, element_size))
        .collect()
}

/// `count` fragments of `len` printable ASCII bytes each.
///
/// Fragment contents cycle through `a..=z` so every byte is non-zero and
/// the output is identical across runs.
pub fn fragments(count: usize, len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| (0..len).map(|j| b'a' + ((i + j) % 26) as u8).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_run_layout() {
        assert_eq!(element_run(3, 2), [0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn fragments_are_zero_free() {
        let parts = fragments(30, 8);
        assert_eq!(parts.len(), 30);
        assert!(parts.iter().all(|p| p.len() == 8 && !p.contains(&0)));
        assert_eq!(&parts[1][..3], b"bcd");
    }
}
