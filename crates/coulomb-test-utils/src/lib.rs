//! Test utilities for Coulomb development.
//!
//! Provides grid and field builders for setting up scenarios, a tolerant
//! slice comparison, and [`RecordingHook`] for capturing what a simulator
//! hands to its observers.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{RecordedStep, RecordingHook};

use coulomb_core::{CellIndex, ScalarField, Shape};
use coulomb_space::Grid;

/// A zeroed `rows x cols` grid with the listed cells preset.
///
/// Panics if the shape is invalid or a cell is out of bounds.
pub fn grid_with_charges(rows: usize, cols: usize, charges: &[((usize, usize), f64)]) -> Grid {
    let mut grid = Grid::from_shape(rows, cols).expect("valid test shape");
    for &((r, c), q) in charges {
        grid.set(CellIndex::new(r, c), q)
            .expect("test charge inside the grid");
    }
    grid
}

/// A field with every cell set to `value`.
pub fn uniform_field(shape: Shape, value: f64) -> ScalarField {
    let mut field = ScalarField::zeros(shape);
    field.fill(value);
    field
}

/// Assert two buffers agree element-wise within `tol`.
///
/// NaNs compare equal to each other so that sanitization tests can use it.
#[track_caller]
pub fn assert_fields_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if a.is_nan() && e.is_nan() {
            continue;
        }
        assert!(
            (a - e).abs() <= tol,
            "cell {i}: got {a}, expected {e} (tol {tol})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_with_charges_places_values() {
        let g = grid_with_charges(3, 4, &[((0, 0), -1.0), ((2, 3), 0.5)]);
        assert_eq!(g[(0, 0)], -1.0);
        assert_eq!(g[(2, 3)], 0.5);
        assert_eq!(g.total_charge(), -0.5);
    }

    #[test]
    #[should_panic(expected = "cell 1")]
    fn assert_fields_close_reports_first_bad_cell() {
        assert_fields_close(&[0.0, 1.0], &[0.0, 2.0], 1e-9);
    }
}
