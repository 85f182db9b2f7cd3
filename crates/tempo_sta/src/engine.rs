//! The timing engine boundary and the reference STA implementation.
//!
//! The sizing controller talks to an opaque [`TimingEngine`]: it asks for
//! the worst violating setup paths, reads arc delays while scoring, and
//! swaps instance cell bindings. [`StaEngine`] is the reference
//! implementation: iterative forward relaxation computes arrival times
//! over the arc graph, endpoint slack is the group's required time minus
//! arrival, and each violating endpoint's single worst path is extracted
//! by backtracking the maximum-arrival incoming arc.
//!
//! Every query runs from scratch; there is no incremental update after a
//! swap batch.

use crate::constraints::Constraints;
use crate::ids::{ArcId, InstanceId, LibertyCellId, PinId};
use crate::library::Library;
use crate::netlist::{ArcKind, Netlist, TimingArc};
use crate::path::{PathEnd, PathStep, TimingPath};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A request for the worst violating path ends.
#[derive(Debug, Clone)]
pub struct PathQuery {
    /// Lower slack bound, inclusive, in seconds.
    pub min_slack: f64,
    /// Upper slack bound, inclusive, in seconds.
    pub max_slack: f64,
    /// Maximum number of timing groups to report.
    pub group_count: usize,
    /// Maximum number of endpoints per group.
    pub endpoint_count: usize,
    /// Deduplicate results on endpoint pin identity.
    pub unique_pins: bool,
    /// Request setup (max-delay) analysis.
    pub setup: bool,
    /// Request hold (min-delay) analysis. Never set by the sizer.
    pub hold: bool,
}

impl PathQuery {
    /// A query for violating setup paths: slacks in `(-inf, 0]`, up to
    /// `paths_per_group` endpoints per timing group, unique pins.
    pub fn violating(paths_per_group: usize) -> Self {
        Self {
            min_slack: f64::NEG_INFINITY,
            max_slack: 0.0,
            group_count: paths_per_group,
            endpoint_count: paths_per_group,
            unique_pins: true,
            setup: true,
            hold: false,
        }
    }
}

/// The opaque timing service the sizing controller is built around.
///
/// An external STA engine can stand behind this trait; [`StaEngine`] is
/// the in-tree reference implementation.
pub trait TimingEngine {
    /// Returns the netlist under analysis.
    fn netlist(&self) -> &Netlist;

    /// Returns the characterized cell library.
    fn library(&self) -> &Library;

    /// Returns, per timing group, the worst violating endpoints' single
    /// worst setup paths, filtered and bounded by `query`.
    fn find_path_ends(&self, query: &PathQuery) -> Vec<PathEnd>;

    /// Returns the intrinsic delay of an arc in seconds, resolved through
    /// the owning instance's current cell binding for cell arcs.
    fn intrinsic_delay(&self, arc: ArcId) -> f64;

    /// Atomically rebinds an instance to a different library cell.
    fn replace_cell(&mut self, instance: InstanceId, cell: LibertyCellId);
}

/// The reference STA engine: netlist + library + constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaEngine {
    netlist: Netlist,
    library: Library,
    constraints: Constraints,
}

impl StaEngine {
    /// Creates an engine over the given design.
    pub fn new(netlist: Netlist, library: Library, constraints: Constraints) -> Self {
        Self {
            netlist,
            library,
            constraints,
        }
    }

    /// Returns the constraint set.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    fn arc_delay(&self, arc: &TimingArc) -> f64 {
        match &arc.kind {
            ArcKind::Net { delay } => *delay,
            ArcKind::Cell => {
                let owner = self.netlist.instance_of(arc.from);
                match self.netlist.liberty_cell_of(owner) {
                    Some(cell) => self.library.cell(cell).delay,
                    None => 0.0,
                }
            }
        }
    }

    /// Forward relaxation: maximum arrival time at each pin.
    ///
    /// Pins with no incoming arcs are startpoints with arrival 0; all
    /// others start unreachable. At most `pin_count` passes are needed for
    /// an acyclic arc graph.
    fn arrival_times(&self) -> Vec<f64> {
        let n = self.netlist.pin_count();
        let mut has_incoming = vec![false; n];
        for arc in self.netlist.arcs() {
            has_incoming[arc.to.as_raw() as usize] = true;
        }

        let mut arrival = vec![0.0_f64; n];
        for (i, arr) in arrival.iter_mut().enumerate() {
            if has_incoming[i] {
                *arr = f64::NEG_INFINITY;
            }
        }

        for _ in 0..n {
            let mut changed = false;
            for arc in self.netlist.arcs() {
                let from_idx = arc.from.as_raw() as usize;
                let to_idx = arc.to.as_raw() as usize;
                let new_arrival = arrival[from_idx] + self.arc_delay(arc);
                if new_arrival > arrival[to_idx] {
                    arrival[to_idx] = new_arrival;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        // Unreachable pins contribute nothing.
        for a in &mut arrival {
            if *a == f64::NEG_INFINITY {
                *a = 0.0;
            }
        }

        arrival
    }

    /// Backtracks the worst path into `endpoint` along maximum-arrival
    /// incoming arcs. Ties go to the lowest driving pin ID so extraction
    /// is reproducible across runs.
    fn extract_worst_path(&self, endpoint: PinId, arrival: &[f64]) -> TimingPath {
        let mut rev_steps = Vec::new();
        let mut visited = HashSet::new();
        let mut current = endpoint;

        loop {
            // A combinational loop in malformed input would never terminate.
            if !visited.insert(current) {
                break;
            }

            let mut best: Option<&TimingArc> = None;
            let mut best_key = f64::NEG_INFINITY;
            for arc in self.netlist.incoming_arcs(current) {
                let key = arrival[arc.from.as_raw() as usize] + self.arc_delay(arc);
                let take = match best {
                    None => true,
                    Some(b) => {
                        key > best_key || (key == best_key && arc.from.as_raw() < b.from.as_raw())
                    }
                };
                if take {
                    best = Some(arc);
                    best_key = key;
                }
            }

            match best {
                Some(arc) => {
                    rev_steps.push(PathStep {
                        pin: current,
                        prev_arc: Some(arc.id),
                    });
                    current = arc.from;
                }
                None => {
                    rev_steps.push(PathStep {
                        pin: current,
                        prev_arc: None,
                    });
                    break;
                }
            }
        }

        rev_steps.reverse();
        TimingPath::new(endpoint, rev_steps)
    }
}

impl TimingEngine for StaEngine {
    fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    fn library(&self) -> &Library {
        &self.library
    }

    fn find_path_ends(&self, query: &PathQuery) -> Vec<PathEnd> {
        if !query.setup {
            return Vec::new();
        }

        let arrival = self.arrival_times();

        // Collect in-bound endpoints per timing group. BTreeMap keeps the
        // group order stable across runs.
        let mut groups: BTreeMap<&str, Vec<(PinId, f64)>> = BTreeMap::new();
        for pin in self.netlist.pins() {
            let Some(group) = pin.group.as_deref() else {
                continue;
            };
            let Some(required) = self.constraints.required(group) else {
                continue;
            };
            let slack = required - arrival[pin.id.as_raw() as usize];
            if slack >= query.min_slack && slack <= query.max_slack {
                groups.entry(group).or_default().push((pin.id, slack));
            }
        }

        let mut seen = HashSet::new();
        let mut ends = Vec::new();
        for (_, mut endpoints) in groups.into_iter().take(query.group_count) {
            endpoints.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.as_raw().cmp(&b.0.as_raw())));
            endpoints.truncate(query.endpoint_count);
            for (pin, slack) in endpoints {
                if query.unique_pins && !seen.insert(pin) {
                    continue;
                }
                ends.push(PathEnd {
                    slack,
                    path: self.extract_worst_path(pin, &arrival),
                });
            }
        }
        ends
    }

    fn intrinsic_delay(&self, arc: ArcId) -> f64 {
        self.arc_delay(self.netlist.arc(arc))
    }

    fn replace_cell(&mut self, instance: InstanceId, cell: LibertyCellId) {
        self.netlist.rebind(instance, cell);
    }
}
