//! In-place cell swaps for selected offenders.
//!
//! For each selected instance the mutator derives the fast-variant name
//! by substituting the slow-grade marker, looks the variant up in the
//! library, applies the swap at the engine, and appends one audit record.
//! An instance whose cell name does not actually contain the marker is a
//! scorer-level invariant violation; it is reported and skipped. A
//! missing fast variant ends the batch with a library-incomplete result.
//! A selected instance without a liberty binding at all aborts the batch
//! with an internal error, since the scorer can never produce one.

use crate::audit::{AuditError, AuditLog};
use crate::params::SizerParams;
use std::io::{self, Write};
use tempo_common::{unescape_name, InternalError, TempoResult};
use tempo_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use tempo_sta::{InstanceId, LibertyCellId, Netlist, TimingEngine};

/// The result of applying one iteration's swap batch.
#[derive(Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// All selected instances were processed; `swaps` were applied.
    Completed {
        /// Number of swaps actually applied.
        swaps: usize,
    },
    /// A fast variant was missing from the library; the batch stopped.
    LibraryIncomplete {
        /// The characterized name that could not be found.
        missing: String,
    },
}

/// Errors that can occur while mutating the netlist.
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    /// The transformation log rejected a record.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Console output failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    /// A sizing-loop invariant was broken; this is a bug, not a user error.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Swaps each selected instance to its fast-grade variant, in order.
///
/// Swaps are applied one instance at a time in the order dictated by the
/// selector; each swap is individually valid, so a stopped batch leaves
/// the netlist in a well-defined state.
pub fn resize_batch(
    engine: &mut dyn TimingEngine,
    selected: &[InstanceId],
    params: &SizerParams,
    audit: &mut AuditLog,
    sink: &DiagnosticSink,
    out: &mut dyn Write,
) -> Result<BatchOutcome, ResizeError> {
    let mut swaps = 0;

    for &instance in selected {
        let netlist = engine.netlist();
        let cell = bound_cell(netlist, instance)?;
        let from_name = engine.library().cell(cell).name.clone();
        let to_name = from_name.replacen(&params.slow_marker, &params.fast_marker, 1);

        if to_name == from_name {
            // Scorer invariant: only slow-grade cells are ever scored.
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::new(Category::Sizing, 202),
                    format!("cell '{from_name}' does not carry the slow-grade marker"),
                )
                .with_instance(netlist.full_instance_name(instance))
                .with_note("instance skipped for this iteration"),
            );
            continue;
        }

        let Some(to_cell) = engine.library().find_cell(&to_name) else {
            writeln!(out, "WARNING: Missing cell model: {to_name}")?;
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::new(Category::Library, 3),
                    format!("missing cell model: {to_name}"),
                )
                .with_instance(netlist.full_instance_name(instance)),
            );
            return Ok(BatchOutcome::LibraryIncomplete { missing: to_name });
        };

        let scope = parent_scope_name(netlist, instance);
        let leaf = unescape_name(&netlist.instance(instance).name);
        let display = display_instance_name(netlist, instance);

        writeln!(
            out,
            "Resizing instance {display} of type {from_name} to type {to_name}"
        )?;
        engine.replace_cell(instance, to_cell);
        audit.record(&scope, &leaf, &from_name, &to_name)?;
        swaps += 1;
    }

    Ok(BatchOutcome::Completed { swaps })
}

/// The scorer and selector only ever rank liberty-bound instances, so an
/// unbound instance reaching the mutator is a bug upstream, not a design
/// condition to warn about.
fn bound_cell(netlist: &Netlist, instance: InstanceId) -> TempoResult<LibertyCellId> {
    netlist.liberty_cell_of(instance).ok_or_else(|| {
        InternalError::new(format!(
            "selected instance '{}' has no liberty cell binding",
            netlist.full_instance_name(instance)
        ))
    })
}

/// The module cell name of the instance's parent, or empty at the top.
fn parent_scope_name(netlist: &Netlist, instance: InstanceId) -> String {
    netlist
        .instance(instance)
        .parent
        .and_then(|parent| match &netlist.instance(parent).cell {
            Some(tempo_sta::CellRef::Module(name)) => Some(name.clone()),
            _ => None,
        })
        .unwrap_or_default()
}

/// The user-facing hierarchical name: ancestor scopes joined with `.`,
/// the instance's own name unescaped at the tail.
pub(crate) fn display_instance_name(netlist: &Netlist, instance: InstanceId) -> String {
    let leaf = unescape_name(&netlist.instance(instance).name);
    match netlist.instance(instance).parent {
        Some(parent) => {
            let prefix = netlist.full_instance_name(parent);
            if prefix.is_empty() {
                leaf
            } else {
                format!("{prefix}.{leaf}")
            }
        }
        None => leaf,
    }
}
