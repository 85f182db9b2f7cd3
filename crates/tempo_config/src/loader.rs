//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Loads and validates a `tempo.toml` configuration from a project directory.
///
/// Reads `<project_dir>/tempo.toml`, parses it, and validates required
/// fields and value ranges.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join("tempo.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `tempo.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and values are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    let sizing = &config.sizing;
    if sizing.max_iter == 0 {
        return Err(ConfigError::ValidationError(
            "sizing.max_iter must be at least 1".to_string(),
        ));
    }
    if sizing.min_paths_per_group == 0 || sizing.min_swaps_per_iter == 0 {
        return Err(ConfigError::ValidationError(
            "sizing lever minimums must be at least 1".to_string(),
        ));
    }
    if sizing.min_paths_per_group > sizing.max_paths_per_group {
        return Err(ConfigError::ValidationError(
            "sizing.min_paths_per_group exceeds sizing.max_paths_per_group".to_string(),
        ));
    }
    if sizing.min_swaps_per_iter > sizing.max_swaps_per_iter {
        return Err(ConfigError::ValidationError(
            "sizing.min_swaps_per_iter exceeds sizing.max_swaps_per_iter".to_string(),
        ));
    }
    if sizing.delay_exponent < 0.0 || sizing.slack_exponent < 0.0 {
        return Err(ConfigError::ValidationError(
            "sizing exponents must be non-negative".to_string(),
        ));
    }
    if sizing.slow_marker.is_empty() || sizing.fast_marker.is_empty() {
        return Err(ConfigError::MissingField(
            "sizing grade markers".to_string(),
        ));
    }
    if sizing.slow_marker == sizing.fast_marker {
        return Err(ConfigError::ValidationError(
            "slow and fast grade markers must differ".to_string(),
        ));
    }
    Ok(())
}
