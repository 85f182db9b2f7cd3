//! Shared foundational types used across the Tempo sizing tool.
//!
//! This crate provides the internal result type, netlist name
//! escaping/unescaping helpers, and unit conversion helpers shared by the
//! timing model and the sizing controller.

#![warn(missing_docs)]

pub mod names;
pub mod result;
pub mod units;

pub use names::{escape_name, unescape_name};
pub use result::{InternalError, TempoResult};
pub use units::{delay_to_ps, slack_to_ps};
