//! Timing paths extracted by the STA engine.
//!
//! A [`TimingPath`] is a pin-to-pin sequence from a startpoint to an
//! endpoint. It is back-traversable one arc at a time: [`walk_back`]
//! yields `(pin, previous arc)` steps starting at the endpoint, which is
//! the traversal order the offender scorer uses.
//!
//! [`walk_back`]: TimingPath::walk_back

use crate::ids::{ArcId, PinId};
use serde::{Deserialize, Serialize};

/// One step of a timing path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathStep {
    /// The pin this step arrives at.
    pub pin: PinId,
    /// The arc that reaches this pin from the previous step, or `None`
    /// at the path's startpoint.
    pub prev_arc: Option<ArcId>,
}

/// A pin-to-pin timing path from a startpoint to an endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingPath {
    /// The endpoint pin this path terminates at.
    pub endpoint: PinId,
    /// Steps in startpoint-to-endpoint order.
    steps: Vec<PathStep>,
}

impl TimingPath {
    /// Creates a path from steps in startpoint-to-endpoint order.
    pub fn new(endpoint: PinId, steps: Vec<PathStep>) -> Self {
        Self { endpoint, steps }
    }

    /// Returns the steps in startpoint-to-endpoint order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Walks the path backward from its endpoint, one arc at a time.
    ///
    /// Yields `(pin, previous arc)` tuples; the final tuple is the
    /// startpoint with no previous arc.
    pub fn walk_back(&self) -> impl Iterator<Item = (PinId, Option<ArcId>)> + '_ {
        self.steps.iter().rev().map(|step| (step.pin, step.prev_arc))
    }

    /// Returns the number of pins on the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A violating endpoint with its worst path and slack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEnd {
    /// The setup slack at the endpoint, in seconds. Negative is violating.
    pub slack: f64,
    /// The endpoint's single worst path.
    pub path: TimingPath,
}
