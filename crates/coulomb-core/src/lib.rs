//! Core types for the Coulomb charge simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: validated grid
//! [`Shape`]s, cell and step identifiers, the dense [`ScalarField`]
//! container, and the [`GridError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod id;
pub mod shape;

pub use error::GridError;
pub use field::ScalarField;
pub use id::{CellIndex, StepIndex};
pub use shape::Shape;
