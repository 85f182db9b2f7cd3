//! Configuration types deserialized from `tempo.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata (name, output directory).
    pub project: ProjectMeta,
    /// Sizing controller settings.
    #[serde(default)]
    pub sizing: SizingConfig,
}

/// Core project metadata required in every `tempo.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Output directory root for reports and the transformation log.
    #[serde(default = "default_workdir")]
    pub workdir: String,
}

fn default_workdir() -> String {
    ".".to_string()
}

/// The scoring weight applied to each offending arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreWeightName {
    /// Blame grows with the square of the arc's intrinsic delay.
    SquaredDelay,
    /// Blame is `delay^alpha * |slack|^beta` with configured exponents.
    PowerLaw,
}

/// Settings for the sizing controller.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
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
    /// Which scoring weight to apply.
    pub weight: ScoreWeightName,
    /// Delay exponent for the power-law weight.
    pub delay_exponent: f64,
    /// Slack exponent for the power-law weight.
    pub slack_exponent: f64,
    /// Marker substring identifying slow-grade cell names.
    pub slow_marker: String,
    /// Marker substring identifying fast-grade cell names.
    pub fast_marker: String,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            max_iter: 200,
            min_paths_per_group: 10,
            max_paths_per_group: 2000,
            min_swaps_per_iter: 3,
            max_swaps_per_iter: 20,
            weight: ScoreWeightName::SquaredDelay,
            delay_exponent: 1.0,
            slack_exponent: 1.0,
            slow_marker: "_sp0_".to_string(),
            fast_marker: "_sp1_".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizing_defaults_match_documented_table() {
        let sizing = SizingConfig::default();
        assert_eq!(sizing.max_iter, 200);
        assert_eq!(sizing.min_paths_per_group, 10);
        assert_eq!(sizing.max_paths_per_group, 2000);
        assert_eq!(sizing.min_swaps_per_iter, 3);
        assert_eq!(sizing.max_swaps_per_iter, 20);
        assert_eq!(sizing.weight, ScoreWeightName::SquaredDelay);
        assert_eq!(sizing.slow_marker, "_sp0_");
        assert_eq!(sizing.fast_marker, "_sp1_");
    }

    #[test]
    fn weight_name_kebab_case() {
        #[derive(Deserialize)]
        struct Holder {
            weight: ScoreWeightName,
        }
        let holder: Holder = toml::from_str("weight = \"power-law\"").unwrap();
        assert_eq!(holder.weight, ScoreWeightName::PowerLaw);
        let holder: Holder = toml::from_str("weight = \"squared-delay\"").unwrap();
        assert_eq!(holder.weight, ScoreWeightName::SquaredDelay);
    }
}
