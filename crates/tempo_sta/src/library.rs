//! Characterized cell library.
//!
//! A [`Library`] is an arena of named [`LibertyCell`]s with a name index.
//! For sizing purposes a cell is characterized by its intrinsic propagation
//! delay; the speed grade is encoded in the cell name via a marker
//! substring (e.g. `_sp0_` for the slow grade, `_sp1_` for the fast one).

use crate::ids::LibertyCellId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A characterized library cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibertyCell {
    /// The unique ID of this cell.
    pub id: LibertyCellId,
    /// The characterized cell name, including its speed-grade marker.
    pub name: String,
    /// Intrinsic propagation delay through the cell, in seconds.
    pub delay: f64,
}

/// An arena of characterized cells with lookup by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    /// All cells in the library.
    cells: Vec<LibertyCell>,
    /// Name index into `cells`.
    by_name: HashMap<String, LibertyCellId>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a characterized cell and returns its ID.
    ///
    /// If a cell with the same name already exists, the index is updated to
    /// point at the newly added cell.
    pub fn add_cell(&mut self, name: impl Into<String>, delay: f64) -> LibertyCellId {
        let name = name.into();
        let id = LibertyCellId::from_raw(self.cells.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.cells.push(LibertyCell { id, name, delay });
        id
    }

    /// Looks up a cell by its characterized name.
    pub fn find_cell(&self, name: &str) -> Option<LibertyCellId> {
        self.by_name.get(name).copied()
    }

    /// Returns the cell with the given ID.
    pub fn cell(&self, id: LibertyCellId) -> &LibertyCell {
        &self.cells[id.as_raw() as usize]
    }

    /// Returns the number of cells in the library.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
