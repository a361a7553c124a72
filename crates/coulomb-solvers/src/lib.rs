//! Field and transport solvers for Coulomb charge simulations.
//!
//! Both solvers walk the grid's shared neighbour-pair list and apply a
//! per-pair stencil.
//!
//! # Pipeline order (each step)
//!
//! 1. [`FieldSolver`]: charge grid -> field array
//! 2. [`TransportSolver`]: (charge grid, field array) -> next charge grid

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod field;
pub mod stencil;
pub mod transport;

pub use field::{FieldPolicy, FieldSolver, FieldSolverBuilder};
pub use stencil::{DEFAULT_PERMITTIVITY, NEIGHBOUR_SHARE};
pub use transport::{TransportReport, TransportSolver, TransportSolverBuilder};
