//! Controller parameters.

use std::path::PathBuf;
use tempo_config::{ScoreWeightName, SizingConfig};

/// The scoring weight applied to each offending arc contribution.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreWeight {
    /// Blame grows with the square of the arc's intrinsic delay.
    SquaredDelay,
    /// Blame is `delay^alpha * |slack|^beta`.
    PowerLaw {
        /// Exponent applied to the arc's intrinsic delay.
        delay_exponent: f64,
        /// Exponent applied to the magnitude of the path slack.
        slack_exponent: f64,
    },
}

impl ScoreWeight {
    /// The blame contribution of one arc of intrinsic delay `delay` on a
    /// path with slack `slack` (negative for violations).
    pub fn delta(&self, delay: f64, slack: f64) -> f64 {
        match self {
            ScoreWeight::SquaredDelay => delay * delay,
            ScoreWeight::PowerLaw {
                delay_exponent,
                slack_exponent,
            } => delay.powf(*delay_exponent) * slack.abs().powf(*slack_exponent),
        }
    }
}

/// Parameters of the sizing controller.
#[derive(Debug, Clone)]
pub struct SizerParams {
    /// Upper bound on outer sizing iterations.
    pub max_iter: u32,
    /// Initial number of endpoints analyzed per timing group.
    pub min_paths_per_group: usize,
    /// Cap on endpoints analyzed per timing group.
    pub max_paths_per_group: usize,
    /// Initial number of cell swaps per iteration.
    pub min_swaps_per_iter: usize,
    /// Cap on cell swaps per iteration.
    pub max_swaps_per_iter: usize,
    /// The scoring weight for offender ranking.
    pub weight: ScoreWeight,
    /// Marker substring identifying slow-grade cell names.
    pub slow_marker: String,
    /// Marker substring identifying fast-grade cell names.
    pub fast_marker: String,
    /// Output directory root for the transformation log.
    pub workdir: PathBuf,
}

impl Default for SizerParams {
    fn default() -> Self {
        Self {
            max_iter: 200,
            min_paths_per_group: 10,
            max_paths_per_group: 2000,
            min_swaps_per_iter: 3,
            max_swaps_per_iter: 20,
            weight: ScoreWeight::SquaredDelay,
            slow_marker: "_sp0_".to_string(),
            fast_marker: "_sp1_".to_string(),
            workdir: PathBuf::from("."),
        }
    }
}

impl SizerParams {
    /// Builds controller parameters from a loaded `[sizing]` configuration
    /// section and an output directory.
    pub fn from_config(sizing: &SizingConfig, workdir: impl Into<PathBuf>) -> Self {
        let weight = match sizing.weight {
            ScoreWeightName::SquaredDelay => ScoreWeight::SquaredDelay,
            ScoreWeightName::PowerLaw => ScoreWeight::PowerLaw {
                delay_exponent: sizing.delay_exponent,
                slack_exponent: sizing.slack_exponent,
            },
        };
        Self {
            max_iter: sizing.max_iter,
            min_paths_per_group: sizing.min_paths_per_group,
            max_paths_per_group: sizing.max_paths_per_group,
            min_swaps_per_iter: sizing.min_swaps_per_iter,
            max_swaps_per_iter: sizing.max_swaps_per_iter,
            weight,
            slow_marker: sizing.slow_marker.clone(),
            fast_marker: sizing.fast_marker.clone(),
            workdir: workdir.into(),
        }
    }
}
