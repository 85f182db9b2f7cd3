//! Configuration loading for the Tempo sizing tool.
//!
//! Projects are configured through a `tempo.toml` file with a `[project]`
//! section (name, output directory) and a `[sizing]` section mapping onto
//! the controller parameters. Loading validates the configuration; CLI
//! flags override file values at a higher layer.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{ProjectConfig, ProjectMeta, ScoreWeightName, SizingConfig};
