//! Structured diagnostics for the Tempo sizing tool.
//!
//! Diagnostics carry a severity, a category-coded identifier, a message,
//! and optionally the netlist instance they refer to. The sizing
//! components accumulate them in a shared [`DiagnosticSink`], whose
//! severity and category counts are queryable without draining; the CLI
//! renders the drained diagnostics after the run.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::render;
pub use severity::Severity;
pub use sink::DiagnosticSink;
