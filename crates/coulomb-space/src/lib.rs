//! Charge grid and neighbour topology for Coulomb simulations.
//!
//! This crate owns the [`Grid`], a fixed-shape 2D array of charge values,
//! and the Moore-neighbourhood topology that solvers iterate over.
//!
//! # Topology
//!
//! - [`NeighbourPairs`]: every directed `(i, j) -> (k, l)` pair between a
//!   cell and its in-bounds Moore neighbours, in a stable order
//! - [`cache`]: the shape-keyed cache that lets grids of equal shape share
//!   one immutable pair list
//! - [`BoundaryClass`]: interior / edge / corner classification used for
//!   boundary leakage

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod cache;
pub mod grid;
pub mod neighbours;

pub use boundary::BoundaryClass;
pub use grid::{Grid, INJECTED_CHARGE};
pub use neighbours::{Adjacency, NeighbourPair, NeighbourPairs, MOORE_OFFSETS};
