//! Offender scoring over violating paths.
//!
//! Each iteration walks every violating path backward from its endpoint
//! and attributes blame to the slow-grade cell instances it traverses. The
//! contribution of one arc is the configured [`ScoreWeight`] applied to
//! the arc's intrinsic delay and the path's slack. Instances without a
//! liberty binding and cells already at a non-slow grade are never scored.
//!
//! Scores are accumulated into a fresh map every iteration and discarded
//! at the end of it.

use crate::params::ScoreWeight;
use std::collections::HashMap;
use tempo_sta::{InstanceId, PathEnd, TimingEngine};

/// The result of scoring one iteration's violating paths.
#[derive(Debug)]
pub struct ScoreOutcome {
    /// Accumulated blame per instance. Only slow-grade liberty instances
    /// appear; every recorded score is positive unless all contributing
    /// arcs had zero delay.
    pub scores: HashMap<InstanceId, f64>,
    /// The most negative slack seen this iteration, in seconds (<= 0).
    pub wns: f64,
    /// The path end achieving [`wns`](Self::wns), if any path violated.
    pub wns_path: Option<PathEnd>,
    /// Whether the WNS path traverses at least one slow-grade cell.
    pub wns_path_fixable: bool,
}

/// Scores the given violating paths and tracks the WNS trajectory inputs.
///
/// Paths with non-negative slack are skipped. The scorer is
/// order-independent over the path sequence apart from the WNS bookkeeping,
/// which tracks whichever path carries the most negative slack.
pub fn score_paths(
    engine: &dyn TimingEngine,
    ends: &[PathEnd],
    weight: &ScoreWeight,
    slow_marker: &str,
) -> ScoreOutcome {
    let netlist = engine.netlist();
    let library = engine.library();

    let mut scores: HashMap<InstanceId, f64> = HashMap::new();
    let mut wns = 0.0_f64;
    let mut wns_path: Option<PathEnd> = None;
    let mut wns_path_fixable = false;

    for end in ends {
        let slack = end.slack;
        if slack >= 0.0 {
            continue;
        }

        let is_wns_path = slack < wns;
        if is_wns_path {
            wns = slack;
            wns_path = Some(end.clone());
            wns_path_fixable = false;
        }

        for (pin, prev_arc) in end.path.walk_back() {
            let instance = netlist.instance_of(pin);
            let Some(cell) = netlist.liberty_cell_of(instance) else {
                continue;
            };
            if !library.cell(cell).name.contains(slow_marker) {
                continue;
            }
            let delay = prev_arc.map_or(0.0, |arc| engine.intrinsic_delay(arc));
            *scores.entry(instance).or_insert(0.0) += weight.delta(delay, slack);
            if is_wns_path {
                wns_path_fixable = true;
            }
        }
    }

    ScoreOutcome {
        scores,
        wns,
        wns_path,
        wns_path_fixable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_sta::{CellRef, Constraints, Library, Netlist, PathQuery, StaEngine};

    /// Two slow cells in series feeding one endpoint, 500 ps period.
    fn chained_design() -> (StaEngine, InstanceId, InstanceId) {
        let mut lib = Library::new();
        let big = lib.add_cell("mul_sp0_w8", 800e-12);
        let small = lib.add_cell("add_sp0_w8", 200e-12);

        let mut nl = Netlist::new();
        let u1 = nl.add_instance("u1", None, Some(CellRef::Liberty(big)));
        let u2 = nl.add_instance("u2", None, Some(CellRef::Liberty(small)));
        let cap = nl.add_instance("cap", None, None);

        let a1 = nl.add_pin(u1, "A");
        let y1 = nl.add_pin(u1, "Y");
        let a2 = nl.add_pin(u2, "A");
        let y2 = nl.add_pin(u2, "Y");
        let d = nl.add_pin(cap, "D");

        nl.add_cell_arc(a1, y1);
        nl.add_net_arc(y1, a2, 0.0);
        nl.add_cell_arc(a2, y2);
        nl.add_net_arc(y2, d, 0.0);
        nl.mark_endpoint(d, "clk");

        let mut constraints = Constraints::new();
        constraints.set_required("clk", 500e-12);

        (StaEngine::new(nl, lib, constraints), u1, u2)
    }

    fn query_ends(engine: &StaEngine) -> Vec<PathEnd> {
        engine.find_path_ends(&PathQuery::violating(10))
    }

    #[test]
    fn slow_cells_accumulate_blame() {
        let (engine, u1, u2) = chained_design();
        let ends = query_ends(&engine);
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        assert!(outcome.scores.contains_key(&u1));
        assert!(outcome.scores.contains_key(&u2));
        // The 800 ps arc dominates under the squared weight.
        assert!(outcome.scores[&u1] > outcome.scores[&u2]);
    }

    #[test]
    fn wns_tracked_with_fixable_path() {
        let (engine, _, _) = chained_design();
        let ends = query_ends(&engine);
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        // arrival 1000 ps vs required 500 ps
        assert!((outcome.wns + 500e-12).abs() < 1e-15);
        assert!(outcome.wns_path.is_some());
        assert!(outcome.wns_path_fixable);
    }

    #[test]
    fn fast_grade_cells_never_scored() {
        let mut lib = Library::new();
        let fast = lib.add_cell("add_sp1_w8", 900e-12);
        let mut nl = Netlist::new();
        let u1 = nl.add_instance("u1", None, Some(CellRef::Liberty(fast)));
        let cap = nl.add_instance("cap", None, None);
        let a = nl.add_pin(u1, "A");
        let y = nl.add_pin(u1, "Y");
        let d = nl.add_pin(cap, "D");
        nl.add_cell_arc(a, y);
        nl.add_net_arc(y, d, 0.0);
        nl.mark_endpoint(d, "clk");
        let mut constraints = Constraints::new();
        constraints.set_required("clk", 500e-12);
        let engine = StaEngine::new(nl, lib, constraints);

        let ends = query_ends(&engine);
        assert_eq!(ends.len(), 1);
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        assert!(outcome.scores.is_empty());
        assert!(outcome.wns < 0.0);
        assert!(!outcome.wns_path_fixable);
    }

    #[test]
    fn unbound_instances_skipped() {
        let (engine, _, _) = chained_design();
        let ends = query_ends(&engine);
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        // Only the two liberty instances are scored; launch/capture are not.
        assert_eq!(outcome.scores.len(), 2);
    }

    #[test]
    fn non_violating_paths_skipped() {
        let (engine, _, _) = chained_design();
        let mut ends = query_ends(&engine);
        ends[0].slack = 1e-12;
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        assert!(outcome.scores.is_empty());
        assert_eq!(outcome.wns, 0.0);
        assert!(outcome.wns_path.is_none());
    }

    #[test]
    fn multiple_paths_accumulate_on_shared_instance() {
        let (engine, u1, _) = chained_design();
        let ends = query_ends(&engine);
        let once = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        let doubled: Vec<PathEnd> = ends.iter().cloned().chain(ends.iter().cloned()).collect();
        let twice = score_paths(&engine, &doubled, &ScoreWeight::SquaredDelay, "_sp0_");
        assert!((twice.scores[&u1] - 2.0 * once.scores[&u1]).abs() < 1e-30);
    }

    #[test]
    fn power_law_weight_scales_with_slack() {
        let (engine, u1, _) = chained_design();
        let ends = query_ends(&engine);
        let flat = score_paths(
            &engine,
            &ends,
            &ScoreWeight::PowerLaw {
                delay_exponent: 1.0,
                slack_exponent: 0.0,
            },
            "_sp0_",
        );
        let slack_weighted = score_paths(
            &engine,
            &ends,
            &ScoreWeight::PowerLaw {
                delay_exponent: 1.0,
                slack_exponent: 1.0,
            },
            "_sp0_",
        );
        // |slack| = 500 ps < 1 s, so the slack factor shrinks every score.
        assert!(slack_weighted.scores[&u1] < flat.scores[&u1]);
    }

    #[test]
    fn unfixable_wns_path_among_scored_paths() {
        let mut lib = Library::new();
        let slow = lib.add_cell("add_sp0_w8", 600e-12);
        let fast = lib.add_cell("mul_sp1_w8", 900e-12);

        let mut nl = Netlist::new();
        let u_slow = nl.add_instance("u_slow", None, Some(CellRef::Liberty(slow)));
        let u_fast = nl.add_instance("u_fast", None, Some(CellRef::Liberty(fast)));
        let cap1 = nl.add_instance("cap1", None, None);
        let cap2 = nl.add_instance("cap2", None, None);

        let a1 = nl.add_pin(u_slow, "A");
        let y1 = nl.add_pin(u_slow, "Y");
        let d1 = nl.add_pin(cap1, "D");
        nl.add_cell_arc(a1, y1);
        nl.add_net_arc(y1, d1, 0.0);
        nl.mark_endpoint(d1, "clk");

        let a2 = nl.add_pin(u_fast, "A");
        let y2 = nl.add_pin(u_fast, "Y");
        let d2 = nl.add_pin(cap2, "D");
        nl.add_cell_arc(a2, y2);
        nl.add_net_arc(y2, d2, 0.0);
        nl.mark_endpoint(d2, "clk");

        let mut constraints = Constraints::new();
        constraints.set_required("clk", 500e-12);
        let engine = StaEngine::new(nl, lib, constraints);

        let ends = engine.find_path_ends(&PathQuery::violating(10));
        assert_eq!(ends.len(), 2);
        let outcome = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        // The fast-grade 900 ps path is the WNS path and carries no
        // resizable cell; the slow 600 ps path still accumulates blame.
        assert!((outcome.wns + 400e-12).abs() < 1e-15);
        assert!(!outcome.wns_path_fixable);
        assert!(outcome.scores.contains_key(&u_slow));
        assert!(!outcome.scores.contains_key(&u_fast));
    }

    #[test]
    fn score_map_is_fresh_per_call() {
        let (engine, _, _) = chained_design();
        let ends = query_ends(&engine);
        let first = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        let second = score_paths(&engine, &ends, &ScoreWeight::SquaredDelay, "_sp0_");
        assert_eq!(first.scores.len(), second.scores.len());
        for (inst, score) in &first.scores {
            assert_eq!(score, &second.scores[inst]);
        }
    }
}
