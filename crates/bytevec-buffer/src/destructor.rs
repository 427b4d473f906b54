//! Per-element cleanup callbacks.

use std::fmt;
use std::rc::Rc;

/// Callback run on one element's bytes immediately before they are
/// overwritten or freed.
///
/// The callback gets exclusive access to the element for the duration of
/// the call and must not keep it. Cloning a `Destructor` shares the same
/// callback; aliasing copies of a buffer carry a clone.
#[derive(Clone)]
pub struct Destructor(Rc<dyn Fn(&mut [u8])>);

impl Destructor {
    /// Wrap a cleanup closure.
    pub fn new(f: impl Fn(&mut [u8]) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Run the callback on one element.
    pub(crate) fn run(&self, element: &mut [u8]) {
        (self.0)(element);
    }
}

impl fmt::Debug for Destructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Destructor(..)")
    }
}
