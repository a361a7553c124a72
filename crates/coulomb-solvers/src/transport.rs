//! Field-driven charge transport with frictional loss and boundary leakage.
//!
//! Each call computes the next charge distribution from a frozen snapshot
//! `q` of the current one:
//!
//! ```text
//! for each pair (i, j) -> (k, l):
//!     Q    = min(E[i, j] * mu * q[i, j] / 8, q[i, j] / 8)
//!     loss = d * friction * q[i, j]
//!     q'[k, l] += Q - loss
//!     q'[i, j] -= Q
//!
//! for each edge or corner cell (i, j):
//!     q'[i, j] -= E[i, j] * mu * q[i, j] / 8
//! ```
//!
//! All reads come from `q` and all writes go to the separate buffer `q'`,
//! which is published into the grid in one move at the end. The result is
//! therefore independent of pair order. Drift conserves charge pair by
//! pair; friction and leakage are pure sinks.
//!
//! Constructed via the builder pattern: [`TransportSolver::builder`].

use crate::stencil::NEIGHBOUR_SHARE;
use coulomb_core::{GridError, ScalarField};
use coulomb_space::{BoundaryClass, Grid, NeighbourPair};
use std::sync::Arc;

/// Totals from one transport step.
///
/// Without sanitization, the grid's total charge changes by exactly
/// `-(friction_loss + boundary_leakage)`, up to rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransportReport {
    /// Sum of drift flux `Q` over all pairs (signed).
    pub drift: f64,
    /// Sum of frictional loss over all pairs (signed).
    pub friction_loss: f64,
    /// Sum of charge removed at the open boundary (signed).
    pub boundary_leakage: f64,
    /// Pairs skipped because their flux was not finite (sanitizing only).
    pub skipped_pairs: usize,
    /// Output cells reset to zero because they were not finite
    /// (sanitizing only).
    pub sanitized_cells: usize,
}

impl TransportReport {
    /// Total charge removed from the grid this step.
    pub fn net_loss(&self) -> f64 {
        self.friction_loss + self.boundary_leakage
    }
}

/// Moves charge between neighbouring cells under the influence of a field.
///
/// The solver is stateless between calls; mobility and friction are fixed
/// at construction.
#[derive(Clone, Debug)]
pub struct TransportSolver {
    mobility: f64,
    friction: f64,
    sanitize_non_finite: bool,
}

/// Builder for [`TransportSolver`].
///
/// Defaults: mobility 0.5, friction 0.01, no sanitization.
pub struct TransportSolverBuilder {
    mobility: f64,
    friction: f64,
    sanitize_non_finite: bool,
}

impl TransportSolver {
    /// Create a new builder for configuring a `TransportSolver`.
    pub fn builder() -> TransportSolverBuilder {
        TransportSolverBuilder {
            mobility: 0.5,
            friction: 0.01,
            sanitize_non_finite: false,
        }
    }

    /// Mobility `mu`.
    pub fn mobility(&self) -> f64 {
        self.mobility
    }

    /// Friction coefficient.
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Whether non-finite values are neutralised.
    pub fn sanitizes_non_finite(&self) -> bool {
        self.sanitize_non_finite
    }

    /// Advance `grid` by one transport step under `field`.
    ///
    /// The grid keeps its identity and neighbour-pair handle; only its
    /// values are replaced.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ShapeMismatch` if `field` and `grid` differ in
    /// shape. The grid is left untouched.
    pub fn calculate_charge(
        &self,
        grid: &mut Grid,
        field: &ScalarField,
    ) -> Result<TransportReport, GridError> {
        if field.shape() != grid.shape() {
            return Err(GridError::ShapeMismatch {
                expected: grid.shape(),
                actual: field.shape(),
            });
        }

        let pairs = Arc::clone(grid.neighbour_pairs());
        let (next, report) = self.advance(grid.values(), field, pairs.as_slice());

        if report.sanitized_cells > 0 || report.skipped_pairs > 0 {
            log::warn!(
                "transport sanitized {} cells and skipped {} pairs with non-finite values",
                report.sanitized_cells,
                report.skipped_pairs
            );
        }

        grid.replace_values(next)?;
        Ok(report)
    }

    /// Compute the next charge buffer from the frozen snapshot `charge`.
    ///
    /// `pairs` may be in any order; the caller guarantees every pair lies
    /// inside `charge.shape()`.
    fn advance(
        &self,
        charge: &ScalarField,
        field: &ScalarField,
        pairs: &[NeighbourPair],
    ) -> (Vec<f64>, TransportReport) {
        let q = charge.as_slice();
        let e = field.as_slice();
        let mut next = q.to_vec();
        let mut report = TransportReport::default();

        for pair in pairs {
            let qi = self.read(q[pair.source_flat]);
            let ei = self.read(e[pair.source_flat]);

            let drift =
                ((ei * self.mobility * qi) / NEIGHBOUR_SHARE).min(qi / NEIGHBOUR_SHARE);
            let loss = pair.distance() * self.friction * qi;

            if self.sanitize_non_finite && !(drift.is_finite() && loss.is_finite()) {
                report.skipped_pairs += 1;
                continue;
            }

            next[pair.target_flat] += drift - loss;
            next[pair.source_flat] -= drift;
            report.drift += drift;
            report.friction_loss += loss;
        }

        let shape = charge.shape();
        for (n, cell) in shape.cells().enumerate() {
            if !BoundaryClass::of(cell, shape).is_some_and(BoundaryClass::is_open) {
                continue;
            }
            let leak = (self.read(e[n]) * self.mobility * self.read(q[n])) / NEIGHBOUR_SHARE;
            if self.sanitize_non_finite && !leak.is_finite() {
                continue;
            }
            next[n] -= leak;
            report.boundary_leakage += leak;
        }

        if self.sanitize_non_finite {
            for v in next.iter_mut().filter(|v| !v.is_finite()) {
                *v = 0.0;
                report.sanitized_cells += 1;
            }
        }

        (next, report)
    }

    #[inline]
    fn read(&self, v: f64) -> f64 {
        if self.sanitize_non_finite && !v.is_finite() {
            0.0
        } else {
            v
        }
    }
}

impl TransportSolverBuilder {
    /// Set the mobility `mu` (default: 0.5). Must be finite and >= 0.
    pub fn mobility(mut self, mobility: f64) -> Self {
        self.mobility = mobility;
        self
    }

    /// Set the friction coefficient (default: 0.01). Must be finite and >= 0.
    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Treat non-finite inputs as zero and zero any non-finite output
    /// (default: off).
    pub fn sanitize_non_finite(mut self, on: bool) -> Self {
        self.sanitize_non_finite = on;
        self
    }

    /// Build the solver, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `mobility` or `friction` is negative or not finite.
    pub fn build(self) -> Result<TransportSolver, String> {
        if !self.mobility.is_finite() || self.mobility < 0.0 {
            return Err(format!(
                "mobility must be finite and >= 0, got {}",
                self.mobility
            ));
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(format!(
                "friction must be finite and >= 0, got {}",
                self.friction
            ));
        }
        Ok(TransportSolver {
            mobility: self.mobility,
            friction: self.friction,
            sanitize_non_finite: self.sanitize_non_finite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coulomb_test_utils::{assert_fields_close, grid_with_charges, uniform_field};
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::f64::consts::SQRT_2;

    const TOL: f64 = 1e-12;

    fn solver(mobility: f64, friction: f64) -> TransportSolver {
        TransportSolver::builder()
            .mobility(mobility)
            .friction(friction)
            .build()
            .unwrap()
    }

    // ---------------------------------------------------------------
    // Builder tests
    // ---------------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let s = TransportSolver::builder().build().unwrap();
        assert_eq!(s.mobility(), 0.5);
        assert_eq!(s.friction(), 0.01);
        assert!(!s.sanitizes_non_finite());
    }

    #[test]
    fn builder_rejects_negative_mobility() {
        let result = TransportSolver::builder().mobility(-0.1).build();
        assert!(result.unwrap_err().contains("mobility"));
    }

    #[test]
    fn builder_rejects_nan_friction() {
        let result = TransportSolver::builder().friction(f64::NAN).build();
        assert!(result.unwrap_err().contains("friction"));
    }

    #[test]
    fn builder_accepts_zero_coefficients() {
        assert!(TransportSolver::builder()
            .mobility(0.0)
            .friction(0.0)
            .build()
            .is_ok());
    }

    // ---------------------------------------------------------------
    // Step logic tests
    // ---------------------------------------------------------------

    #[test]
    fn interior_charge_loses_only_friction() {
        let q = 1.0;
        let friction = 0.01;
        let mut grid = grid_with_charges(5, 5, &[((2, 2), q)]);
        let field = uniform_field(grid.shape(), 0.5);
        let before = grid.total_charge();

        let report = solver(0.5, friction)
            .calculate_charge(&mut grid, &field)
            .unwrap();

        let expected_loss = friction * q * (4.0 + 4.0 * SQRT_2);
        assert!((report.friction_loss - expected_loss).abs() < TOL);
        assert_eq!(report.boundary_leakage, 0.0);
        assert!((grid.total_charge() - (before - expected_loss)).abs() < TOL);
    }

    #[test]
    fn corner_charge_leaks_once() {
        let friction = 0.01;
        let mut grid = grid_with_charges(4, 4, &[((0, 0), 1.0)]);
        let field = uniform_field(grid.shape(), 0.5);

        let report = solver(0.5, friction)
            .calculate_charge(&mut grid, &field)
            .unwrap();

        // Q = min(0.5 * 0.5 * 1 / 8, 1 / 8) = 1/32 per pair, 3 pairs,
        // plus a single 1/32 boundary subtraction.
        let q_pair = 1.0 / 32.0;
        assert!((report.boundary_leakage - q_pair).abs() < TOL);
        assert!((grid[(0, 0)] - (1.0 - 3.0 * q_pair - q_pair)).abs() < TOL);

        let expected_total = 1.0 - friction * (2.0 + SQRT_2) - q_pair;
        assert!((grid.total_charge() - expected_total).abs() < TOL);
    }

    #[test]
    fn edge_charge_leaks_like_corner() {
        let mut corner = grid_with_charges(4, 4, &[((0, 0), 1.0)]);
        let mut edge = grid_with_charges(4, 4, &[((0, 1), 1.0)]);
        let field = uniform_field(corner.shape(), 0.5);
        let s = solver(0.5, 0.0);

        let rc = s.calculate_charge(&mut corner, &field).unwrap();
        let re = s.calculate_charge(&mut edge, &field).unwrap();

        assert!((rc.boundary_leakage - re.boundary_leakage).abs() < TOL);
    }

    #[test]
    fn frictionless_drift_conserves_charge_in_interior() {
        let mut grid = grid_with_charges(5, 5, &[((2, 2), 1.0)]);
        let field = uniform_field(grid.shape(), 1.0);

        solver(1.0, 0.0).calculate_charge(&mut grid, &field).unwrap();

        // Q = min(1/8, 1/8): the source hands its whole charge out evenly.
        assert!(grid[(2, 2)].abs() < TOL);
        for (r, c) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)] {
            assert!((grid[(r, c)] - 0.125).abs() < TOL);
        }
        assert!((grid.total_charge() - 1.0).abs() < TOL);
    }

    #[test]
    fn drift_is_capped_by_local_charge() {
        let mut grid = grid_with_charges(3, 3, &[((1, 1), 1.0)]);
        let field = uniform_field(grid.shape(), 100.0);

        let report = solver(1.0, 0.0).calculate_charge(&mut grid, &field).unwrap();

        assert!((report.drift - 1.0).abs() < TOL, "8 pairs * 1/8 each");
        assert!(grid[(1, 1)].abs() < TOL);
    }

    #[test]
    fn zero_field_moves_nothing_without_friction() {
        let mut grid = grid_with_charges(4, 4, &[((1, 1), 2.0), ((3, 0), -1.0)]);
        let before = grid.values().clone();
        let field = uniform_field(grid.shape(), 0.0);

        solver(0.5, 0.0).calculate_charge(&mut grid, &field).unwrap();

        // Positive charge: min(0, q/8) = 0. Negative charge: min(0, q/8) = q/8,
        // so only the negative cell drifts.
        assert_eq!(grid[(1, 1)], before[(1, 1)]);
        assert!(grid[(3, 0)] > before[(3, 0)]);
    }

    #[test]
    fn result_is_independent_of_pair_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut grid = Grid::from_shape(6, 7).unwrap();
        for v in grid.values_mut().as_mut_slice() {
            *v = rng.random_range(-1.0..1.0);
        }
        let mut field = ScalarField::zeros(grid.shape());
        for v in field.as_mut_slice() {
            *v = rng.random_range(-0.5..0.5);
        }
        let s = solver(0.3, 0.02);

        let canonical = grid.neighbour_pairs().as_slice().to_vec();
        let (reference, ref_report) = s.advance(grid.values(), &field, &canonical);

        for _ in 0..5 {
            let mut shuffled = canonical.clone();
            shuffled.shuffle(&mut rng);
            let (out, report) = s.advance(grid.values(), &field, &shuffled);
            assert_fields_close(&out, &reference, 1e-12);
            assert!((report.friction_loss - ref_report.friction_loss).abs() < 1e-12);
        }
    }

    #[test]
    fn report_accounts_for_total_change() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::from_shape(5, 5).unwrap();
        for v in grid.values_mut().as_mut_slice() {
            *v = rng.random_range(-1.0..0.0);
        }
        let field = uniform_field(grid.shape(), 0.2);
        let before = grid.total_charge();

        let report = solver(0.5, 0.01).calculate_charge(&mut grid, &field).unwrap();

        assert!((grid.total_charge() - (before - report.net_loss())).abs() < 1e-9);
    }

    #[test]
    fn grid_identity_survives_step() {
        let mut grid = grid_with_charges(3, 3, &[((1, 1), -1.0)]);
        let pairs = Arc::clone(grid.neighbour_pairs());
        let field = uniform_field(grid.shape(), 0.1);

        solver(0.5, 0.01).calculate_charge(&mut grid, &field).unwrap();

        assert!(Arc::ptr_eq(grid.neighbour_pairs(), &pairs));
    }

    #[test]
    fn mismatched_field_is_rejected() {
        let mut grid = Grid::from_shape(3, 3).unwrap();
        let field = ScalarField::zeros(coulomb_core::Shape::new(3, 4).unwrap());
        let err = solver(0.5, 0.01)
            .calculate_charge(&mut grid, &field)
            .unwrap_err();
        assert!(matches!(err, GridError::ShapeMismatch { .. }));
    }

    // ---------------------------------------------------------------
    // Sanitization tests
    // ---------------------------------------------------------------

    #[test]
    fn nan_propagates_without_sanitizing() {
        let mut grid = grid_with_charges(3, 3, &[((1, 1), f64::NAN)]);
        let field = uniform_field(grid.shape(), 0.5);
        solver(0.5, 0.01).calculate_charge(&mut grid, &field).unwrap();
        assert!(grid.values().as_slice().iter().any(|v| v.is_nan()));
    }

    #[test]
    fn sanitizing_neutralises_non_finite_values() {
        let mut grid = grid_with_charges(3, 3, &[((1, 1), f64::NAN), ((0, 0), -1.0)]);
        let mut field = uniform_field(grid.shape(), 0.5);
        field[(2, 2)] = f64::INFINITY;
        let s = TransportSolver::builder()
            .sanitize_non_finite(true)
            .build()
            .unwrap();

        let report = s.calculate_charge(&mut grid, &field).unwrap();

        assert!(grid.values().as_slice().iter().all(|v| v.is_finite()));
        assert_eq!(grid[(1, 1)], 0.0);
        assert_eq!(report.sanitized_cells, 1);
    }
}
