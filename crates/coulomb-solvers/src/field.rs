//! Finite-difference approximation of the electric field.
//!
//! For each directed neighbour pair `(i, j) -> (k, l)` the solver adds
//!
//! ```text
//! E[i, j] += (q[k, l] - q[i, j]) / (d * permittivity) / 8
//! ```
//!
//! where `d` is 1 for orthogonal and √2 for diagonal neighbours. The
//! result is a local "field magnitude", not a Poisson solve: it is positive
//! where a cell is more negative than its surroundings.
//!
//! Whether the field is cleared before each solve is governed by
//! [`FieldPolicy`].

use crate::stencil::{DEFAULT_PERMITTIVITY, NEIGHBOUR_SHARE};
use coulomb_core::{GridError, ScalarField};
use coulomb_space::Grid;

/// What happens to the previous field values when a new solve runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Add each solve on top of the existing values. Two solves of the
    /// same charge grid leave exactly twice the single-solve field.
    #[default]
    Accumulate,
    /// Zero the field before every solve, so repeated solves of the same
    /// charge grid agree.
    Reset,
}

/// Produces the field array from a charge [`Grid`].
///
/// The solver owns the field buffer; its shape is fixed to the shape of
/// the grid it was created from.
///
/// # Construction
///
/// ```
/// use coulomb_solvers::{FieldPolicy, FieldSolver};
/// use coulomb_space::Grid;
///
/// let mut grid = Grid::from_shape(3, 3).unwrap();
/// grid[(1, 1)] = -1.0;
///
/// let solver = FieldSolver::builder()
///     .policy(FieldPolicy::Reset)
///     .build_for(&grid)
///     .unwrap();
/// assert!(solver.field()[(1, 1)] > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct FieldSolver {
    field: ScalarField,
    permittivity: f64,
    policy: FieldPolicy,
    sanitize_non_finite: bool,
}

/// Builder for [`FieldSolver`].
///
/// Defaults: permittivity 2.0, [`FieldPolicy::Accumulate`], no
/// sanitization.
pub struct FieldSolverBuilder {
    permittivity: f64,
    policy: FieldPolicy,
    sanitize_non_finite: bool,
}

impl FieldSolver {
    /// Create a new builder.
    pub fn builder() -> FieldSolverBuilder {
        FieldSolverBuilder {
            permittivity: DEFAULT_PERMITTIVITY,
            policy: FieldPolicy::default(),
            sanitize_non_finite: false,
        }
    }

    /// Default-configured solver for `grid`, with one solve already run.
    pub fn from_charge_grid(grid: &Grid) -> Self {
        let mut solver = Self {
            field: ScalarField::zeros(grid.shape()),
            permittivity: DEFAULT_PERMITTIVITY,
            policy: FieldPolicy::default(),
            sanitize_non_finite: false,
        };
        solver.solve(grid);
        solver
    }

    /// Shorthand for the builder with both knobs set.
    ///
    /// # Errors
    ///
    /// Same as [`FieldSolverBuilder::build_for`].
    pub fn with_policy(
        grid: &Grid,
        policy: FieldPolicy,
        permittivity: f64,
    ) -> Result<Self, String> {
        Self::builder()
            .policy(policy)
            .permittivity(permittivity)
            .build_for(grid)
    }

    /// Run one solve against `grid`.
    ///
    /// Under [`FieldPolicy::Accumulate`] contributions are added to the
    /// current field; under [`FieldPolicy::Reset`] the field is cleared
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `GridError::ShapeMismatch` if `grid` does not have the shape
    /// this solver was built for. The field is left untouched.
    pub fn calculate_field(&mut self, grid: &Grid) -> Result<&ScalarField, GridError> {
        if grid.shape() != self.field.shape() {
            return Err(GridError::ShapeMismatch {
                expected: self.field.shape(),
                actual: grid.shape(),
            });
        }
        self.solve(grid);
        Ok(&self.field)
    }

    fn solve(&mut self, grid: &Grid) {
        if self.policy == FieldPolicy::Reset {
            self.field.fill(0.0);
        }
        let q = grid.values().as_slice();
        let e = self.field.as_mut_slice();
        let read = |v: f64| {
            if self.sanitize_non_finite && !v.is_finite() {
                0.0
            } else {
                v
            }
        };
        for pair in grid.neighbour_pairs().iter() {
            let dq = read(q[pair.target_flat]) - read(q[pair.source_flat]);
            e[pair.source_flat] += dq / (pair.distance() * self.permittivity) / NEIGHBOUR_SHARE;
        }
    }

    /// The current field values.
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Zero the field without running a solve.
    pub fn reset(&mut self) {
        self.field.fill(0.0);
    }

    /// Active accumulation policy.
    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    /// Whether non-finite charges are read as zero.
    pub fn sanitizes_non_finite(&self) -> bool {
        self.sanitize_non_finite
    }

    /// Permittivity used in the stencil denominator.
    pub fn permittivity(&self) -> f64 {
        self.permittivity
    }

    /// Consume the solver and keep only its field.
    pub fn into_field(self) -> ScalarField {
        self.field
    }
}

impl FieldSolverBuilder {
    /// Set the permittivity (default: 2.0). Must be finite and > 0.
    pub fn permittivity(mut self, permittivity: f64) -> Self {
        self.permittivity = permittivity;
        self
    }

    /// Set the accumulation policy (default: `Accumulate`).
    pub fn policy(mut self, policy: FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read non-finite charge values as zero (default: off).
    pub fn sanitize_non_finite(mut self, on: bool) -> Self {
        self.sanitize_non_finite = on;
        self
    }

    /// Build a solver sized to `grid` and run the initial solve.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `permittivity` is zero, negative, or not finite.
    pub fn build_for(self, grid: &Grid) -> Result<FieldSolver, String> {
        if !self.permittivity.is_finite() || self.permittivity <= 0.0 {
            return Err(format!(
                "permittivity must be finite and > 0, got {}",
                self.permittivity
            ));
        }
        let mut solver = FieldSolver {
            field: ScalarField::zeros(grid.shape()),
            permittivity: self.permittivity,
            policy: self.policy,
            sanitize_non_finite: self.sanitize_non_finite,
        };
        solver.solve(grid);
        Ok(solver)
    }
}
