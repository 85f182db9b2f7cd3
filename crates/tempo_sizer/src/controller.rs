//! The closed-loop sizing controller.
//!
//! Each turn of the loop queries the timer for the worst violating setup
//! paths, scores the slow-grade instances they traverse, swaps a bounded
//! batch of the top offenders, and advances the effort schedule. The loop
//! terminates with a well-defined outcome: clean, partial (nothing left
//! to fix), unfixable WNS path, incomplete library, or exhausted budget.
//!
//! The timer is re-run from scratch after every swap batch; scoring sees
//! a consistent netlist snapshot because nothing mutates during it. The
//! transformation log is closed on every exit path, errors included.

use crate::audit::{AuditError, AuditLog};
use crate::effort::EffortSchedule;
use crate::params::SizerParams;
use crate::resize::{display_instance_name, resize_batch, BatchOutcome, ResizeError};
use crate::score::score_paths;
use crate::select::select_offenders;
use std::collections::HashSet;
use std::io::{self, Write};
use tempo_common::{slack_to_ps, InternalError};
use tempo_diagnostics::DiagnosticSink;
use tempo_sta::{PathEnd, PathQuery, TimingEngine};

/// The terminal state of a sizing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizerState {
    /// All violations resolved.
    Clean,
    /// No scoreable cells remained while violations persist.
    Partial,
    /// The WNS path contains no resizable cells.
    Unfixable,
    /// A fast-grade variant was missing from the library.
    LibraryIncomplete,
    /// The iteration budget ran out with residual violations.
    BudgetExhausted,
}

impl SizerState {
    /// Returns `true` if the run resolved every violation.
    pub fn is_clean(self) -> bool {
        self == SizerState::Clean
    }
}

/// The result of a completed sizing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SizerOutcome {
    /// The terminal state the loop reached.
    pub state: SizerState,
    /// The final achieved WNS in seconds (0 for a clean run, <= 0 otherwise).
    pub final_wns: f64,
    /// Completed outer iterations.
    pub iterations: u32,
    /// Total swaps applied across the run.
    pub swaps: usize,
}

/// Errors that abort a sizing run.
#[derive(Debug, thiserror::Error)]
pub enum SizerError {
    /// The transformation log could not be written.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// Console output failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    /// A sizing-loop invariant was broken; this is a bug in Tempo.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ResizeError> for SizerError {
    fn from(err: ResizeError) -> Self {
        match err {
            ResizeError::Audit(e) => SizerError::Audit(e),
            ResizeError::Io(e) => SizerError::Io(e),
            ResizeError::Internal(e) => SizerError::Internal(e),
        }
    }
}

/// Runs the sizing loop, creating the transformation log under
/// `params.workdir`.
pub fn run_sizing(
    engine: &mut dyn TimingEngine,
    params: &SizerParams,
    sink: &DiagnosticSink,
    out: &mut dyn Write,
) -> Result<SizerOutcome, SizerError> {
    let mut audit = AuditLog::create(&params.workdir)?;
    run_sizing_with_audit(engine, params, &mut audit, sink, out)
}

/// Runs the sizing loop against an already-open transformation log.
///
/// The log is closed before returning on every path, including errors.
pub fn run_sizing_with_audit(
    engine: &mut dyn TimingEngine,
    params: &SizerParams,
    audit: &mut AuditLog,
    sink: &DiagnosticSink,
    out: &mut dyn Write,
) -> Result<SizerOutcome, SizerError> {
    let result = sizing_loop(engine, params, audit, sink, out);
    let closed = audit.close();
    let outcome = result?;
    closed?;
    Ok(outcome)
}

fn sizing_loop(
    engine: &mut dyn TimingEngine,
    params: &SizerParams,
    audit: &mut AuditLog,
    sink: &DiagnosticSink,
    out: &mut dyn Write,
) -> Result<SizerOutcome, SizerError> {
    let schedule = EffortSchedule::new(params);
    let mut levels = schedule.initial();
    // Sentinel above any real slack; real WNS values are <= 0.
    let mut wns_previous = f64::INFINITY;
    let mut iterations: u32 = 0;
    let mut total_swaps: usize = 0;

    loop {
        writeln!(out, "Running timer...")?;
        let ends = engine.find_path_ends(&PathQuery::violating(levels.paths_per_group));

        if ends.is_empty() {
            writeln!(out, "Final WNS: 0")?;
            writeln!(out, "Timing optimization done!")?;
            return Ok(SizerOutcome {
                state: SizerState::Clean,
                final_wns: 0.0,
                iterations,
                swaps: total_swaps,
            });
        }

        let scored = score_paths(engine, &ends, &params.weight, &params.slow_marker);

        if scored.scores.is_empty() && scored.wns == 0.0 {
            writeln!(out, "Final WNS: 0")?;
            writeln!(out, "Timing optimization done!")?;
            return Ok(SizerOutcome {
                state: SizerState::Clean,
                final_wns: 0.0,
                iterations,
                swaps: total_swaps,
            });
        }

        if !scored.wns_path_fixable {
            writeln!(out, "Final WNS: {:.3}ps", slack_to_ps(scored.wns))?;
            writeln!(out, "WARNING: WNS Path does not contain any resizable cells!")?;
            if let Some(end) = &scored.wns_path {
                dump_wns_path(engine, end, out)?;
            }
            writeln!(out, "Timing optimization partially done!")?;
            return Ok(SizerOutcome {
                state: SizerState::Unfixable,
                final_wns: scored.wns,
                iterations,
                swaps: total_swaps,
            });
        }

        // A fixable WNS path implies scored instances, so an empty map
        // here is pure safety against a scorer regression.
        if scored.scores.is_empty() {
            writeln!(out, "Final WNS: {:.3}ps", slack_to_ps(scored.wns))?;
            writeln!(out, "Timing optimization partially done!")?;
            return Ok(SizerOutcome {
                state: SizerState::Partial,
                final_wns: scored.wns,
                iterations,
                swaps: total_swaps,
            });
        }

        let selected = select_offenders(&scored.scores, engine.netlist(), levels.swaps_per_iter);
        match resize_batch(engine, &selected, params, audit, sink, out)? {
            BatchOutcome::LibraryIncomplete { .. } => {
                writeln!(out, "Final WNS: {:.3}ps", slack_to_ps(scored.wns))?;
                writeln!(out, "Timing optimization partially done!")?;
                return Ok(SizerOutcome {
                    state: SizerState::LibraryIncomplete,
                    final_wns: scored.wns,
                    iterations,
                    swaps: total_swaps,
                });
            }
            BatchOutcome::Completed { swaps } => total_swaps += swaps,
        }

        iterations += 1;

        if iterations > 1 {
            let delta_ps = (slack_to_ps(scored.wns) - slack_to_ps(wns_previous)).abs();
            writeln!(out, "Delta WNS: {delta_ps:.3}ps")?;
        }

        let next_levels = schedule.advance(iterations, levels);
        if next_levels.paths_per_group != levels.paths_per_group {
            writeln!(out, "Analyzing {} paths", next_levels.paths_per_group)?;
        }
        levels = next_levels;

        writeln!(out, "Iteration {iterations} of {}", params.max_iter)?;
        if iterations >= params.max_iter {
            writeln!(out, "Final WNS: {:.3}ps", slack_to_ps(scored.wns))?;
            writeln!(out, "Timing optimization partially done!")?;
            writeln!(out, "WARNING: Cannot meet timing constraints!")?;
            return Ok(SizerOutcome {
                state: SizerState::BudgetExhausted,
                final_wns: scored.wns,
                iterations,
                swaps: total_swaps,
            });
        }
        writeln!(out, "Current WNS: {:.3}ps", slack_to_ps(scored.wns))?;
        wns_previous = scored.wns;
    }
}

/// Prints the WNS path for user review, deduplicated by instance name.
///
/// The reported path is the worst one seen this iteration; since only one
/// path is kept per endpoint, it may differ slightly from the final
/// timing report's path with the same WNS.
fn dump_wns_path(
    engine: &dyn TimingEngine,
    end: &PathEnd,
    out: &mut dyn Write,
) -> io::Result<()> {
    let netlist = engine.netlist();
    let library = engine.library();
    let mut reported = HashSet::new();

    for (pin, _) in end.path.walk_back() {
        let instance = netlist.instance_of(pin);
        let name = display_instance_name(netlist, instance);
        if name.is_empty() || !reported.insert(name.clone()) {
            continue;
        }
        let cell = netlist
            .liberty_cell_of(instance)
            .map(|c| library.cell(c).name.clone())
            .unwrap_or_default();
        writeln!(out, "WNS Path: {name} ({cell})")?;
    }
    Ok(())
}
