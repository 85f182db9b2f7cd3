//! Deterministic top-K offender selection.

use std::collections::HashMap;
use tempo_sta::{InstanceId, Netlist};

/// Picks at most `swaps_per_iter` instances with the highest scores.
///
/// The result is sorted descending by score; ties are broken by the
/// instance's hierarchical name so selection is reproducible across runs
/// regardless of hash-map iteration order. Zero and negative scores are
/// excluded (unreachable by construction of the scorer, but guarded
/// anyway).
pub fn select_offenders(
    scores: &HashMap<InstanceId, f64>,
    netlist: &Netlist,
    swaps_per_iter: usize,
) -> Vec<InstanceId> {
    let mut ranked: Vec<(InstanceId, f64, String)> = scores
        .iter()
        .filter(|(_, score)| **score > 0.0)
        .map(|(inst, score)| (*inst, *score, netlist.full_instance_name(*inst)))
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
    ranked.truncate(swaps_per_iter);
    ranked.into_iter().map(|(inst, _, _)| inst).collect()
}
