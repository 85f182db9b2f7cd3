//! Netlist data structures for timing analysis and sizing.
//!
//! The [`Netlist`] is an arena of hierarchical [`Instance`]s, their
//! [`Pin`]s, and directed [`TimingArc`]s between pins. Leaf instances are
//! bound to a characterized library cell; hierarchy instances carry their
//! module name instead. The sizing controller mutates only the
//! instance-to-cell binding; instances and pins are never created or
//! destroyed during a run.
//!
//! Cell arcs resolve their delay through the owning instance's current
//! binding, so a cell swap takes effect on the next timing query without
//! touching the arc itself. Net arcs carry a fixed interconnect delay.

use crate::ids::{ArcId, InstanceId, LibertyCellId, PinId};
use crate::library::Library;
use serde::{Deserialize, Serialize};

/// The cell binding of a netlist instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellRef {
    /// A leaf instance bound to a characterized library cell.
    Liberty(LibertyCellId),
    /// A hierarchy instance carrying its module cell name.
    Module(String),
}

/// A netlist instance.
///
/// Owned by the netlist for the lifetime of the run. Identified by its
/// hierarchical position (`parent` chain) and name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// The unique ID of this instance.
    pub id: InstanceId,
    /// The instance name as emitted by the engine (may contain escapes).
    pub name: String,
    /// The enclosing instance, or `None` for the design top.
    pub parent: Option<InstanceId>,
    /// The current cell binding, or `None` if unbound.
    pub cell: Option<CellRef>,
}

/// A pin on a netlist instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// The unique ID of this pin.
    pub id: PinId,
    /// The pin name within its instance (e.g. "A", "Y").
    pub name: String,
    /// The instance this pin belongs to.
    pub instance: InstanceId,
    /// The timing group this pin terminates, if it is an endpoint.
    pub group: Option<String>,
}

/// The delay source of a timing arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArcKind {
    /// A cell-internal arc; delay comes from the owning instance's
    /// current liberty binding.
    Cell,
    /// An interconnect arc with a fixed delay in seconds.
    Net {
        /// Interconnect delay in seconds.
        delay: f64,
    },
}

/// A directed delay edge between two pins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingArc {
    /// The unique ID of this arc.
    pub id: ArcId,
    /// The driving pin.
    pub from: PinId,
    /// The driven pin.
    pub to: PinId,
    /// Where this arc's delay comes from.
    pub kind: ArcKind,
}

/// An arena of instances, pins, and timing arcs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    /// All instances in the design.
    instances: Vec<Instance>,
    /// All pins in the design.
    pins: Vec<Pin>,
    /// All timing arcs in the design.
    arcs: Vec<TimingArc>,
}

impl Netlist {
    /// Creates an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance and returns its ID.
    pub fn add_instance(
        &mut self,
        name: impl Into<String>,
        parent: Option<InstanceId>,
        cell: Option<CellRef>,
    ) -> InstanceId {
        let id = InstanceId::from_raw(self.instances.len() as u32);
        self.instances.push(Instance {
            id,
            name: name.into(),
            parent,
            cell,
        });
        id
    }

    /// Adds a pin on the given instance and returns its ID.
    pub fn add_pin(&mut self, instance: InstanceId, name: impl Into<String>) -> PinId {
        let id = PinId::from_raw(self.pins.len() as u32);
        self.pins.push(Pin {
            id,
            name: name.into(),
            instance,
            group: None,
        });
        id
    }

    /// Adds a cell-internal arc between two pins of the same instance.
    pub fn add_cell_arc(&mut self, from: PinId, to: PinId) -> ArcId {
        self.push_arc(from, to, ArcKind::Cell)
    }

    /// Adds an interconnect arc with a fixed delay in seconds.
    pub fn add_net_arc(&mut self, from: PinId, to: PinId, delay: f64) -> ArcId {
        self.push_arc(from, to, ArcKind::Net { delay })
    }

    fn push_arc(&mut self, from: PinId, to: PinId, kind: ArcKind) -> ArcId {
        let id = ArcId::from_raw(self.arcs.len() as u32);
        self.arcs.push(TimingArc { id, from, to, kind });
        id
    }

    /// Marks a pin as a timing endpoint belonging to the given group.
    pub fn mark_endpoint(&mut self, pin: PinId, group: impl Into<String>) {
        self.pins[pin.as_raw() as usize].group = Some(group.into());
    }

    /// Returns the instance with the given ID.
    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.as_raw() as usize]
    }

    /// Returns the pin with the given ID.
    pub fn pin(&self, id: PinId) -> &Pin {
        &self.pins[id.as_raw() as usize]
    }

    /// Returns the arc with the given ID.
    pub fn arc(&self, id: ArcId) -> &TimingArc {
        &self.arcs[id.as_raw() as usize]
    }

    /// Returns the instance that owns the given pin.
    pub fn instance_of(&self, pin: PinId) -> InstanceId {
        self.pin(pin).instance
    }

    /// Rebinds an instance to a different library cell.
    pub fn rebind(&mut self, instance: InstanceId, cell: LibertyCellId) {
        self.instances[instance.as_raw() as usize].cell = Some(CellRef::Liberty(cell));
    }

    /// Returns the liberty binding of an instance, if it has one.
    pub fn liberty_cell_of(&self, instance: InstanceId) -> Option<LibertyCellId> {
        match &self.instance(instance).cell {
            Some(CellRef::Liberty(id)) => Some(*id),
            _ => None,
        }
    }

    /// Returns the cell name of an instance: the characterized name for a
    /// liberty binding, the module name for hierarchy, `None` if unbound.
    pub fn cell_name<'a>(&'a self, instance: InstanceId, library: &'a Library) -> Option<&'a str> {
        match &self.instance(instance).cell {
            Some(CellRef::Liberty(id)) => Some(library.cell(*id).name.as_str()),
            Some(CellRef::Module(name)) => Some(name.as_str()),
            None => None,
        }
    }

    /// Returns the hierarchical full name of an instance.
    ///
    /// Non-empty ancestor names are joined with `.`, outermost first, with
    /// the instance's own name at the tail.
    pub fn full_instance_name(&self, instance: InstanceId) -> String {
        let mut scopes = Vec::new();
        let mut cursor = self.instance(instance).parent;
        while let Some(parent) = cursor {
            let parent_inst = self.instance(parent);
            if !parent_inst.name.is_empty() {
                scopes.push(parent_inst.name.as_str());
            }
            cursor = parent_inst.parent;
        }
        scopes.reverse();
        scopes.push(self.instance(instance).name.as_str());
        scopes.join(".")
    }

    /// Returns all arcs in the design.
    pub fn arcs(&self) -> &[TimingArc] {
        &self.arcs
    }

    /// Returns all pins in the design.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Returns all arcs arriving at the given pin.
    pub fn incoming_arcs(&self, pin: PinId) -> Vec<&TimingArc> {
        self.arcs.iter().filter(|a| a.to == pin).collect()
    }

    /// Returns the number of instances in the design.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Returns the number of pins in the design.
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Returns the number of arcs in the design.
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }
}
