//! Coulomb: charge accumulation and transport on a 2D grid.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Coulomb sub-crates. For most users, adding `coulomb` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use coulomb::prelude::*;
//!
//! // A 10×10 grid with one pre-seeded negative charge.
//! let mut grid = Grid::from_shape(10, 10).unwrap();
//! grid[(4, 5)] = -1.0;
//!
//! let config = SimConfig {
//!     mobility: 0.001,
//!     friction: 100.0,
//!     seed: 42,
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulator::new(grid, config).unwrap();
//! sim.attach_step_hook(
//!     |charge: &ScalarField, step: StepIndex| {
//!         assert_eq!(charge.shape(), Shape::new(10, 10).unwrap());
//!         let _ = step;
//!     },
//!     HookTarget::Charge,
//! );
//!
//! let summary = sim.run(100, 0.5).unwrap();
//! assert_eq!(summary.steps, 100);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `coulomb-core` | Shapes, cell and step indices, `ScalarField`, `GridError` |
//! | [`space`] | `coulomb-space` | `Grid`, neighbour pairs, the topology cache |
//! | [`solvers`] | `coulomb-solvers` | Field and transport solvers |
//! | [`engine`] | `coulomb-engine` | `Simulator`, config, hooks, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`coulomb-core`).
pub use coulomb_core as types;

/// Charge grid and neighbour topology (`coulomb-space`).
///
/// Grids of equal shape share one [`space::NeighbourPairs`] list through
/// the process-wide [`space::cache`].
pub use coulomb_space as space;

/// Field and transport solvers (`coulomb-solvers`).
pub use coulomb_solvers as solvers;

/// The step loop (`coulomb-engine`).
///
/// [`engine::Simulator`] owns a grid and drives both solvers, random
/// injection and hooks.
pub use coulomb_engine as engine;

/// Common imports for typical Coulomb usage.
///
/// ```rust
/// use coulomb::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use coulomb_core::{CellIndex, GridError, ScalarField, Shape, StepIndex};

    // Space
    pub use coulomb_space::{BoundaryClass, Grid};

    // Solvers
    pub use coulomb_solvers::{FieldPolicy, FieldSolver, TransportReport, TransportSolver};

    // Engine
    pub use coulomb_engine::{
        ConfigError, HookTarget, RunSummary, SimConfig, Simulator, StepError, StepHook,
        StepMetrics,
    };
}
