//! Setup-timing constraints.
//!
//! Each timing group (clock domain) has a required arrival time at its
//! endpoints. Slack at an endpoint is the group's required time minus the
//! data arrival time; negative slack is a violation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Required arrival times per timing group, in seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Required time (clock period) per group name.
    required: BTreeMap<String, f64>,
}

impl Constraints {
    /// Creates an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required arrival time for a timing group, in seconds.
    pub fn set_required(&mut self, group: impl Into<String>, seconds: f64) {
        self.required.insert(group.into(), seconds);
    }

    /// Returns the required arrival time for a group, if constrained.
    pub fn required(&self, group: &str) -> Option<f64> {
        self.required.get(group).copied()
    }

    /// Returns the number of constrained groups.
    pub fn group_count(&self) -> usize {
        self.required.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_constraints() {
        let c = Constraints::new();
        assert_eq!(c.group_count(), 0);
        assert!(c.required("clk").is_none());
    }

    #[test]
    fn set_and_get() {
        let mut c = Constraints::new();
        c.set_required("clk", 2e-9);
        c.set_required("clk_slow", 10e-9);
        assert_eq!(c.group_count(), 2);
        assert_eq!(c.required("clk"), Some(2e-9));
        assert_eq!(c.required("clk_slow"), Some(10e-9));
    }

    #[test]
    fn overwrite_required() {
        let mut c = Constraints::new();
        c.set_required("clk", 2e-9);
        c.set_required("clk", 1e-9);
        assert_eq!(c.required("clk"), Some(1e-9));
        assert_eq!(c.group_count(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut c = Constraints::new();
        c.set_required("clk", 2e-9);
        let json = serde_json::to_string(&c).unwrap();
        let restored: Constraints = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.required("clk"), Some(2e-9));
    }
}
