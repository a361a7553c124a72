//! Simulation engine for Coulomb charge grids.
//!
//! Provides the [`Simulator`] that owns a charge grid and drives the
//! field solve, transport, random charge injection and observer hooks,
//! one step at a time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod hook;
pub mod metrics;
pub mod simulator;

pub use config::{ConfigError, SimConfig};
pub use hook::{HookTarget, StepHook};
pub use metrics::StepMetrics;
pub use simulator::{RunSummary, Simulator, StepError};
