//! Compact terminal rendering for diagnostics.

use crate::diagnostic::Diagnostic;
use std::fmt::Write;

/// Renders a diagnostic as a compact multi-line string.
///
/// The first line is `<severity>[<code>]: <message>`, followed by the
/// instance context and any footnotes, each indented on its own line.
pub fn render(diag: &Diagnostic) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}[{}]: {}", diag.severity, diag.code, diag.message);
    if let Some(instance) = &diag.instance {
        let _ = write!(out, "\n  instance: {instance}");
    }
    for note in &diag.notes {
        let _ = write!(out, "\n  note: {note}");
    }
    out
}
