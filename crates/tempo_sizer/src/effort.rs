//! Stepped effort scheduling.
//!
//! The controller's effort levers — endpoints analyzed per timing group
//! and swaps applied per iteration — follow a three-phase schedule over
//! the iteration budget: the first third runs at minimum effort, the
//! middle third ramps both levers exponentially, and the final third pins
//! them at maximum. The schedule is monotone non-decreasing, so effort is
//! never withdrawn once escalated.

use crate::params::SizerParams;

/// The two effort levers for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffortLevels {
    /// Endpoints analyzed per timing group.
    pub paths_per_group: usize,
    /// Swaps applied per iteration.
    pub swaps_per_iter: usize,
}

/// A stepped effort schedule over a fixed iteration budget.
#[derive(Debug, Clone)]
pub struct EffortSchedule {
    min_paths_per_group: usize,
    max_paths_per_group: usize,
    min_swaps_per_iter: usize,
    max_swaps_per_iter: usize,
    max_iter: u32,
}

impl EffortSchedule {
    /// Builds the schedule from the controller parameters.
    pub fn new(params: &SizerParams) -> Self {
        Self {
            min_paths_per_group: params.min_paths_per_group,
            max_paths_per_group: params.max_paths_per_group,
            min_swaps_per_iter: params.min_swaps_per_iter,
            max_swaps_per_iter: params.max_swaps_per_iter,
            max_iter: params.max_iter,
        }
    }

    /// The levers for the first iteration: minimum effort.
    pub fn initial(&self) -> EffortLevels {
        EffortLevels {
            paths_per_group: self.min_paths_per_group,
            swaps_per_iter: self.min_swaps_per_iter,
        }
    }

    /// Advances the levers after `completed` iterations have finished.
    ///
    /// Phase 1 (first third of the budget) holds minimum effort, phase 2
    /// (middle third) applies `x <- min(2x - x_min + 1, x_max)` to each
    /// lever per iteration, phase 3 (final third) pins both at maximum.
    pub fn advance(&self, completed: u32, current: EffortLevels) -> EffortLevels {
        let phase1_end = self.max_iter / 3;
        let phase2_end = 2 * self.max_iter / 3;

        if completed < phase1_end {
            current
        } else if completed < phase2_end {
            EffortLevels {
                paths_per_group: ramp(
                    current.paths_per_group,
                    self.min_paths_per_group,
                    self.max_paths_per_group,
                ),
                swaps_per_iter: ramp(
                    current.swaps_per_iter,
                    self.min_swaps_per_iter,
                    self.max_swaps_per_iter,
                ),
            }
        } else {
            EffortLevels {
                paths_per_group: self.max_paths_per_group,
                swaps_per_iter: self.max_swaps_per_iter,
            }
        }
    }
}

/// One exponential ramp step, saturating at `max`.
///
/// `current` never drops below `min`, so the subtraction cannot wrap.
fn ramp(current: usize, min: usize, max: usize) -> usize {
    (2 * current - min + 1).min(max)
}
