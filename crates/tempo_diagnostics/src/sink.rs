//! Diagnostic accumulator for a sizing run.
//!
//! The sizing loop is single-threaded, so the sink is a plain
//! interior-mutability accumulator rather than a locked queue. Components
//! hold a shared reference and emit as they go; the CLI drains the sink
//! once the run is over. Severity and category counts are queryable
//! without draining, so a caller can summarize a run — or spot the
//! integrity skips the mutator emits — while the diagnostics stay put.

use crate::code::Category;
use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::cell::RefCell;

/// An accumulator for diagnostics emitted during a sizing run.
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emits a diagnostic into the sink. Emission order is preserved.
    pub fn emit(&self, diag: Diagnostic) {
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` if the sink holds any error-severity diagnostics.
    pub fn has_errors(&self) -> bool {
        self.count_severity(Severity::Error) > 0
    }

    /// Returns the number of held diagnostics with the given severity.
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns the number of held diagnostics in the given category.
    pub fn count_category(&self, category: Category) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.code.category == category)
            .count()
    }

    /// Returns the total number of held diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Returns `true` if the sink holds no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    ///
    /// Counts are computed over the held diagnostics, so they drop to
    /// zero once drained; query them before draining.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
