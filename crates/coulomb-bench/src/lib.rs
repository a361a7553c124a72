//! Benchmark profiles and utilities for Coulomb simulations.
//!
//! Provides pre-built `(Grid, SimConfig)` profiles for benchmarking and
//! examples:
//!
//! - [`reference_profile`]: 10x10 grid, low mobility, high friction, one
//!   pre-seeded charge
//! - [`stress_profile`]: 316x316 grid (~100K cells) with default physics
//! - [`seeded_grid`]: deterministic random pre-seeding via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use coulomb_core::Shape;
use coulomb_engine::SimConfig;
use coulomb_space::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Injection threshold used with [`reference_profile`].
pub const REFERENCE_THRESHOLD: f64 = 0.5;

/// Build the reference profile: 10x10 grid with one charge at the
/// centre, mobility 0.001, friction 100.
pub fn reference_profile(seed: u64) -> (Grid, SimConfig) {
    let mut grid = Grid::from_shape(10, 10).unwrap();
    grid[(5, 5)] = -1.0;
    let config = SimConfig {
        mobility: 0.001,
        friction: 100.0,
        seed,
        ..SimConfig::default()
    };
    (grid, config)
}

/// Build a stress profile: 316x316 grid (~100K cells) with 64 charges
/// scattered by `seed` and default physics.
pub fn stress_profile(seed: u64) -> (Grid, SimConfig) {
    let grid = seeded_grid(Shape::new(316, 316).unwrap(), 64, seed);
    let config = SimConfig {
        seed,
        ..SimConfig::default()
    };
    (grid, config)
}

/// A zero grid with `charges` unit charges placed at random, reproducibly
/// for a given `seed`.
pub fn seeded_grid(shape: Shape, charges: usize, seed: u64) -> Grid {
    let mut grid = Grid::zeros(shape);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..charges {
        grid.place_charge(&mut rng);
    }
    grid
}
