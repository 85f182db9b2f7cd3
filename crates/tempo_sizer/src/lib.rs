//! The Tempo gate-sizing controller.
//!
//! This crate is the optimization loop around the timing engine: it
//! queries the worst violating setup paths, attributes blame to slow-grade
//! operator cells, swaps a bounded batch of top offenders for their
//! fast-grade variants, adapts effort from the WNS trajectory, and
//! terminates with a well-defined [`SizerOutcome`].
//!
//! # Usage
//!
//! ```ignore
//! use tempo_sizer::{run_sizing, SizerParams};
//!
//! let params = SizerParams::default();
//! let outcome = run_sizing(&mut engine, &params, &sink, &mut std::io::stdout())?;
//! println!("terminal state: {:?}, swaps: {}", outcome.state, outcome.swaps);
//! ```
//!
//! # Architecture
//!
//! - [`params`] — controller parameters and scoring weights
//! - [`score`] — blame attribution over backward path walks
//! - [`select`] — deterministic top-K offender selection
//! - [`resize`] — in-place cell swaps and the library-incomplete gate
//! - [`effort`] — the stepped effort schedule
//! - [`audit`] — the transformation log
//! - [`controller`] — the loop and its terminal states

#![warn(missing_docs)]

pub mod audit;
pub mod controller;
pub mod effort;
pub mod params;
pub mod resize;
pub mod score;
pub mod select;

pub use audit::{AuditError, AuditLog};
pub use controller::{
    run_sizing, run_sizing_with_audit, SizerError, SizerOutcome, SizerState,
};
pub use effort::{EffortLevels, EffortSchedule};
pub use params::{ScoreWeight, SizerParams};
pub use resize::{resize_batch, BatchOutcome, ResizeError};
pub use score::{score_paths, ScoreOutcome};
pub use select::select_offenders;
