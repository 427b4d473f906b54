//! Test fixtures for bytevec development.
//!
//! - [`CountingDestructor`] records every element a buffer destroys.
//! - [`FailingAllocator`] succeeds a fixed number of times, then refuses.
//! - [`RecordingSink`] captures diagnostics as rendered strings.
//! - [`quiet_config`] is a default config whose diagnostics go nowhere.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bytevec_buffer::Destructor;
use bytevec_core::{
    BufferConfig, BufferError, ByteAllocator, Diagnostic, DiagnosticSink, GlobalAllocator,
    SilentSink,
};

/// Records a copy of every element passed to its destructor, in call order.
///
/// Clone the fixture to keep a handle for assertions after the
/// destructor has been moved into a buffer.
#[derive(Clone, Default)]
pub struct CountingDestructor {
    calls: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl CountingDestructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Destructor`] feeding this fixture.
    pub fn destructor(&self) -> Destructor {
        let calls = Rc::clone(&self.calls);
        Destructor::new(move |bytes| calls.borrow_mut().push(bytes.to_vec()))
    }

    /// Number of destructor invocations so far.
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Element bytes seen, in call order.
    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.borrow().clone()
    }

    /// First byte of every element seen, in call order.
    pub fn first_bytes(&self) -> Vec<u8> {
        self.calls.borrow().iter().map(|c| c[0]).collect()
    }
}

/// Allocator that delegates to [`GlobalAllocator`] for the first
/// `grow_budget` grows and `shrink_budget` shrinks, then fails.
///
/// Release always succeeds.
pub struct FailingAllocator {
    grow_budget: Cell<usize>,
    shrink_budget: Cell<usize>,
    grows: Cell<usize>,
    shrinks: Cell<usize>,
}

impl FailingAllocator {
    pub fn new(grow_budget: usize, shrink_budget: usize) -> Self {
        Self {
            grow_budget: Cell::new(grow_budget),
            shrink_budget: Cell::new(shrink_budget),
            grows: Cell::new(0),
            shrinks: Cell::new(0),
        }
    }

    /// Never allows a grow or shrink.
    pub fn always() -> Self {
        Self::new(0, 0)
    }

    /// Allow `n` more grows from now on.
    pub fn refill_grows(&self, n: usize) {
        self.grow_budget.set(n);
    }

    /// Successful grows so far.
    pub fn grows(&self) -> usize {
        self.grows.get()
    }

    /// Successful shrinks so far.
    pub fn shrinks(&self) -> usize {
        self.shrinks.get()
    }
}

impl ByteAllocator for FailingAllocator {
    fn grow(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError> {
        let budget = self.grow_budget.get();
        if budget == 0 {
            return Err(BufferError::AllocationFailure {
                requested_bytes: new_len,
            });
        }
        GlobalAllocator.grow(region, new_len)?;
        self.grow_budget.set(budget - 1);
        self.grows.set(self.grows.get() + 1);
        Ok(())
    }

    fn shrink(&self, region: &mut Vec<u8>, new_len: usize) -> Result<(), BufferError> {
        let budget = self.shrink_budget.get();
        if budget == 0 {
            return Err(BufferError::AllocationFailure {
                requested_bytes: new_len,
            });
        }
        GlobalAllocator.shrink(region, new_len)?;
        self.shrink_budget.set(budget - 1);
        self.shrinks.set(self.shrinks.get() + 1);
        Ok(())
    }

    fn release(&self, region: &mut Vec<u8>) {
        GlobalAllocator.release(region);
    }
}

/// Collects every diagnostic as `"operation: error"`.
#[derive(Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        self.messages.borrow_mut().push(diagnostic.to_string());
    }
}

/// Default config with diagnostics discarded.
pub fn quiet_config() -> BufferConfig {
    BufferConfig::default().with_diagnostics(Rc::new(SilentSink))
}

/// Default config reporting into `sink`.
pub fn recording_config(sink: &Rc<RecordingSink>) -> BufferConfig {
    BufferConfig::default().with_diagnostics(Rc::clone(sink) as Rc<dyn DiagnosticSink>)
}

/// Quiet config allocating through `allocator`.
pub fn failing_config(allocator: &Rc<FailingAllocator>) -> BufferConfig {
    quiet_config().with_allocator(Rc::clone(allocator) as Rc<dyn ByteAllocator>)
}
