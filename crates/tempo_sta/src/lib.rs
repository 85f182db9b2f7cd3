//! Timing model and reference STA engine for the Tempo sizing tool.
//!
//! This crate provides the netlist and characterized-library data model,
//! setup-timing constraints, back-traversable timing paths, and the
//! [`TimingEngine`] boundary the sizing controller is written against,
//! together with [`StaEngine`], a compact reference implementation.
//!
//! # Usage
//!
//! ```ignore
//! use tempo_sta::{PathQuery, StaEngine, TimingEngine};
//!
//! let mut engine = StaEngine::new(netlist, library, constraints);
//! let ends = engine.find_path_ends(&PathQuery::violating(10));
//! for end in &ends {
//!     println!("slack: {} s over {} pins", end.slack, end.path.len());
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ids`] — opaque arena IDs for instances, pins, arcs, and cells
//! - [`library`] — characterized cells with speed-grade names
//! - [`netlist`] — instances, pins, hierarchy, and timing arcs
//! - [`constraints`] — per-group required times
//! - [`path`] — back-traversable paths and path ends
//! - [`engine`] — the engine trait and the reference STA implementation

#![warn(missing_docs)]

pub mod constraints;
pub mod engine;
pub mod ids;
pub mod library;
pub mod netlist;
pub mod path;

pub use constraints::Constraints;
pub use engine::{PathQuery, StaEngine, TimingEngine};
pub use ids::{ArcId, InstanceId, LibertyCellId, PinId};
pub use library::{Library, LibertyCell};
pub use netlist::{ArcKind, CellRef, Instance, Netlist, Pin, TimingArc};
pub use path::{PathEnd, PathStep, TimingPath};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_query_and_swap() {
        let mut library = Library::new();
        let slow = library.add_cell("add_sp0_w8", 900e-12);
        let fast = library.add_cell("add_sp1_w8", 300e-12);

        let mut netlist = Netlist::new();
        let top = netlist.add_instance("", None, Some(CellRef::Module("top".into())));
        let u1 = netlist.add_instance("u1", Some(top), Some(CellRef::Liberty(slow)));
        let cap = netlist.add_instance("cap", Some(top), None);

        let a = netlist.add_pin(u1, "A");
        let y = netlist.add_pin(u1, "Y");
        let d = netlist.add_pin(cap, "D");
        netlist.add_cell_arc(a, y);
        netlist.add_net_arc(y, d, 100e-12);
        netlist.mark_endpoint(d, "clk");

        let mut constraints = Constraints::new();
        constraints.set_required("clk", 600e-12);

        let mut engine = StaEngine::new(netlist, library, constraints);

        let ends = engine.find_path_ends(&PathQuery::violating(10));
        assert_eq!(ends.len(), 1);
        assert!(ends[0].slack < 0.0);

        engine.replace_cell(u1, fast);
        assert!(engine.find_path_ends(&PathQuery::violating(10)).is_empty());
    }

    #[test]
    fn engine_serde_roundtrip() {
        let mut library = Library::new();
        let slow = library.add_cell("add_sp0_w8", 900e-12);
        let mut netlist = Netlist::new();
        let u1 = netlist.add_instance("u1", None, Some(CellRef::Liberty(slow)));
        let a = netlist.add_pin(u1, "A");
        let y = netlist.add_pin(u1, "Y");
        netlist.add_cell_arc(a, y);
        netlist.mark_endpoint(y, "clk");
        let mut constraints = Constraints::new();
        constraints.set_required("clk", 500e-12);

        let engine = StaEngine::new(netlist, library, constraints);
        let json = serde_json::to_string(&engine).unwrap();
        let restored: StaEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.netlist().instance_count(), 1);
        assert_eq!(restored.library().cell_count(), 1);
        assert_eq!(restored.constraints().required("clk"), Some(500e-12));
    }

    #[test]
    fn reexports_available() {
        let _ = Netlist::new();
        let _ = Library::new();
        let _ = Constraints::new();
        let _ = InstanceId::from_raw(0);
        let _ = PathQuery::violating(1);
    }
}
