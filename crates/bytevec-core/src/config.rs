//! Buffer configuration: capacity policy plus collaborator handles.

use std::fmt;
use std::rc::Rc;

use crate::alloc::{ByteAllocator, GlobalAllocator};
use crate::diag::{DiagnosticSink, TracingSink};
use crate::error::BufferError;

/// Capacity growth and shrink policy.
///
/// Growth is linear (one slot at a time) below `linear_until` and
/// geometric above it, which keeps `push` amortized O(1). Shrinking is
/// checked after every removal: once `len` falls to
/// `floor(capacity * shrink_threshold)` the capacity drops to
/// `floor(capacity * shrink_factor)`, unless that would be zero or
/// smaller than `len`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthPolicy {
    /// Capacities strictly below this grow by exactly one slot.
    ///
    /// Default: 4.
    pub linear_until: usize,

    /// Multiplicative growth factor once `capacity >= linear_until`.
    ///
    /// Default: 1.5. Must be finite and greater than 1.
    pub growth_factor: f64,

    /// Fill ratio at or below which a removal triggers a shrink.
    ///
    /// Default: 0.25. Must lie in `(0, 1)`.
    pub shrink_threshold: f64,

    /// Fraction of the current capacity kept after a shrink.
    ///
    /// Default: 0.5. Must lie in `(0, 1)`.
    pub shrink_factor: f64,
}

impl GrowthPolicy {
    /// Default linear-growth cutoff.
    pub const DEFAULT_LINEAR_UNTIL: usize = 4;

    /// Default geometric growth factor.
    pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;

    /// Default shrink trigger ratio.
    pub const DEFAULT_SHRINK_THRESHOLD: f64 = 0.25;

    /// Default shrink target ratio.
    pub const DEFAULT_SHRINK_FACTOR: f64 = 0.5;

    /// Check that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] naming the first bad field.
    pub fn validate(&self) -> Result<(), BufferError> {
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(BufferError::invalid(format!(
                "growth_factor must be finite and > 1, got {}",
                self.growth_factor
            )));
        }
        if !(self.shrink_threshold > 0.0 && self.shrink_threshold < 1.0) {
            return Err(BufferError::invalid(format!(
                "shrink_threshold must be in (0, 1), got {}",
                self.shrink_threshold
            )));
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(BufferError::invalid(format!(
                "shrink_factor must be in (0, 1), got {}",
                self.shrink_factor
            )));
        }
        Ok(())
    }

    /// Capacity to grow to when a buffer of `capacity` slots is full.
    ///
    /// Always strictly greater than `capacity` (saturating at `usize::MAX`).
    pub fn grown_capacity(&self, capacity: usize) -> usize {
        let next = capacity.saturating_add(1);
        if capacity < self.linear_until {
            return next;
        }
        let scaled = (capacity as f64 * self.growth_factor) as usize;
        scaled.max(next)
    }

    /// Capacity to shrink to after a removal, if any.
    ///
    /// Returns `None` when `len` is still above the trigger ratio, or when
    /// the target would be zero or unable to hold `len` elements.
    pub fn shrunk_capacity(&self, len: usize, capacity: usize) -> Option<usize> {
        let trigger = (capacity as f64 * self.shrink_threshold) as usize;
        if len > trigger {
            return None;
        }
        let target = (capacity as f64 * self.shrink_factor) as usize;
        if target == 0 || target < len || target >= capacity {
            return None;
        }
        Some(target)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            linear_until: Self::DEFAULT_LINEAR_UNTIL,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            shrink_threshold: Self::DEFAULT_SHRINK_THRESHOLD,
            shrink_factor: Self::DEFAULT_SHRINK_FACTOR,
        }
    }
}

/// Everything a buffer needs besides its element layout.
///
/// Cloning a config is cheap: the allocator and diagnostic sink are
/// shared handles. Buffers derived from another buffer (copies,
/// substrings) inherit its config.
#[derive(Clone)]
pub struct BufferConfig {
    /// Growth and shrink policy.
    pub policy: GrowthPolicy,
    /// Allocator that owns every grow/shrink/release of backing storage.
    pub allocator: Rc<dyn ByteAllocator>,
    /// Receiver for precondition-violation reports.
    pub diagnostics: Rc<dyn DiagnosticSink>,
}

impl BufferConfig {
    /// Replace the growth policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GrowthPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the allocator.
    #[must_use]
    pub fn with_allocator(mut self, allocator: Rc<dyn ByteAllocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Validate the policy.
    ///
    /// # Errors
    ///
    /// See [`GrowthPolicy::validate`].
    pub fn validate(&self) -> Result<(), BufferError> {
        self.policy.validate()
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            policy: GrowthPolicy::default(),
            allocator: Rc::new(GlobalAllocator),
            diagnostics: Rc::new(TracingSink),
        }
    }
}

impl fmt::Debug for BufferConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferConfig")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_capacities_grow_linearly() {
        let p = GrowthPolicy::default();
        assert_eq!(p.grown_capacity(0), 1);
        assert_eq!(p.grown_capacity(1), 2);
        assert_eq!(p.grown_capacity(3), 4);
    }

    #[test]
    fn large_capacities_grow_by_half() {
        let p = GrowthPolicy::default();
        assert_eq!(p.grown_capacity(4), 6);
        assert_eq!(p.grown_capacity(6), 9);
        assert_eq!(p.grown_capacity(9), 13);
        assert_eq!(p.grown_capacity(10), 15);
    }

    #[test]
    fn growth_saturates_instead_of_overflowing() {
        let p = GrowthPolicy::default();
        assert_eq!(p.grown_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn shrink_triggers_at_quarter_full() {
        let p = GrowthPolicy::default();
        assert_eq!(p.shrunk_capacity(6, 10), None);
        assert_eq!(p.shrunk_capacity(3, 10), None);
        assert_eq!(p.shrunk_capacity(2, 10), Some(5));
        assert_eq!(p.shrunk_capacity(0, 10), Some(5));
    }

    #[test]
    fn shrink_never_targets_zero() {
        let p = GrowthPolicy::default();
        assert_eq!(p.shrunk_capacity(0, 1), None);
        assert_eq!(p.shrunk_capacity(0, 0), None);
        assert_eq!(p.shrunk_capacity(0, 2), Some(1));
    }

    #[test]
    fn validate_rejects_non_growing_factor() {
        let p = GrowthPolicy {
            growth_factor: 1.0,
            ..GrowthPolicy::default()
        };
        assert!(p.validate().is_err());
        let p = GrowthPolicy {
            shrink_threshold: 0.0,
            ..GrowthPolicy::default()
        };
        assert!(p.validate().is_err());
        let p = GrowthPolicy {
            shrink_factor: f64::NAN,
            ..GrowthPolicy::default()
        };
        assert!(p.validate().is_err());
        assert!(GrowthPolicy::default().validate().is_ok());
    }

    #[test]
    fn config_builders_replace_fields() {
        let policy = GrowthPolicy {
            linear_until: 8,
            ..GrowthPolicy::default()
        };
        let config = BufferConfig::default().with_policy(policy);
        assert_eq!(config.policy.linear_until, 8);
        assert!(format!("{config:?}").contains("linear_until: 8"));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn growth_is_strictly_monotonic(capacity in 0usize..1_000_000) {
                let p = GrowthPolicy::default();
                prop_assert!(p.grown_capacity(capacity) > capacity);
            }

            #[test]
            fn shrink_target_holds_len(capacity in 1usize..100_000, len in 0usize..100_000) {
                let p = GrowthPolicy::default();
                if let Some(target) = p.shrunk_capacity(len, capacity) {
                    prop_assert!(target >= len);
                    prop_assert!(target > 0);
                    prop_assert!(target < capacity);
                }
            }
        }
    }
}
