//! Diagnostic reporting for precondition violations.
//!
//! Failed operations report to a [`DiagnosticSink`] before returning their
//! error. Reports are advisory: nothing in the library reads them back,
//! and a sink that drops everything ([`SilentSink`]) is always valid.

use std::fmt;

use crate::error::BufferError;

/// One precondition violation.
#[derive(Clone, Copy, Debug)]
pub struct Diagnostic<'a> {
    /// Name of the failing operation, e.g. `"insert"` or `"text.substring"`.
    pub operation: &'static str,
    /// The violated condition.
    pub error: &'a BufferError,
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.error)
    }
}

/// Receiver for [`Diagnostic`] reports.
pub trait DiagnosticSink {
    /// Handle one report. Must not panic.
    fn report(&self, diagnostic: &Diagnostic<'_>);
}

/// Forwards every report to `tracing` at WARN level.
///
/// Output format and destination are decided by whichever subscriber the
/// application installs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        tracing::warn!(
            operation = diagnostic.operation,
            error = %diagnostic.error,
            "bytevec precondition violated"
        );
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn report(&self, _diagnostic: &Diagnostic<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_renders_operation_and_error() {
        let err = BufferError::EmptyCollection;
        let diag = Diagnostic {
            operation: "pop",
            error: &err,
        };
        assert_eq!(diag.to_string(), "pop: collection is empty");
    }

    #[test]
    fn builtin_sinks_accept_reports() {
        let err = BufferError::IndexOutOfBounds { index: 1, len: 0 };
        let diag = Diagnostic {
            operation: "get",
            error: &err,
        };
        TracingSink.report(&diag);
        SilentSink.report(&diag);
    }
}
