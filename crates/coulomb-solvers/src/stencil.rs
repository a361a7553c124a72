//! Constants shared by the field and transport stencils.

/// Every per-pair contribution is divided by the size of a full Moore
/// neighbourhood, even for edge cells that have fewer neighbours.
pub const NEIGHBOUR_SHARE: f64 = 8.0;

/// Default permittivity of the medium.
pub const DEFAULT_PERMITTIVITY: f64 = 2.0;
