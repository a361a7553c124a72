//! The charge [`Grid`]: a [`ScalarField`] plus its cached neighbour topology.

use crate::boundary::BoundaryClass;
use crate::cache;
use crate::neighbours::NeighbourPairs;
use coulomb_core::{CellIndex, GridError, ScalarField, Shape};
use rand::Rng;
use std::ops::{Index, IndexMut};
use std::sync::{Arc, OnceLock};

/// Charge added to a cell by [`Grid::place_charge`].
pub const INJECTED_CHARGE: f64 = -1.0;

/// A rectangular grid of charge values with fixed shape.
///
/// The neighbour-pair list is derived from the shape alone. It is resolved
/// lazily on the first call to [`neighbour_pairs`](Self::neighbour_pairs)
/// through the process-wide [`cache`], so every grid of the same shape
/// ends up holding the same `Arc`.
///
/// # Cloning
///
/// `Clone` duplicates the charge values and shares the neighbour-pair
/// handle (if already resolved); the topology is never copied.
///
/// ```
/// use coulomb_space::Grid;
///
/// let mut grid = Grid::from_shape(3, 3).unwrap();
/// grid[(1, 1)] = -1.0;
/// let _ = grid.neighbour_pairs();
///
/// let copy = grid.clone();
/// assert_eq!(copy[(1, 1)], -1.0);
/// assert!(copy.shares_topology_with(&grid));
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    values: ScalarField,
    pairs: OnceLock<Arc<NeighbourPairs>>,
}

impl Grid {
    /// A zero-filled grid of `rows x cols` cells.
    ///
    /// Returns `Err(GridError::InvalidShape)` if either dimension is zero.
    pub fn from_shape(rows: usize, cols: usize) -> Result<Self, GridError> {
        Ok(Self::zeros(Shape::new(rows, cols)?))
    }

    /// A zero-filled grid of an already validated shape.
    pub fn zeros(shape: Shape) -> Self {
        Self::from_values(ScalarField::zeros(shape))
    }

    /// Wrap existing charge values.
    pub fn from_values(values: ScalarField) -> Self {
        Self {
            values,
            pairs: OnceLock::new(),
        }
    }

    /// The grid's shape.
    pub fn shape(&self) -> Shape {
        self.values.shape()
    }

    /// Checked read of one cell.
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.values.get(cell)
    }

    /// Checked write of one cell.
    pub fn set(&mut self, cell: CellIndex, value: f64) -> Result<(), GridError> {
        self.values.set(cell, value)
    }

    /// The charge values.
    pub fn values(&self) -> &ScalarField {
        &self.values
    }

    /// Mutable access to the charge values. The shape cannot change
    /// through this handle.
    pub fn values_mut(&mut self) -> &mut ScalarField {
        &mut self.values
    }

    /// Publish a complete new buffer of charge values.
    ///
    /// The grid keeps its identity and its neighbour-pair handle. On a
    /// length mismatch nothing is modified.
    pub fn replace_values(&mut self, values: Vec<f64>) -> Result<(), GridError> {
        self.values.replace(values)
    }

    /// Sum of all charge values.
    pub fn total_charge(&self) -> f64 {
        self.values.sum()
    }

    /// Inject one unit of negative charge at a uniformly random cell.
    ///
    /// Returns the cell that was hit.
    pub fn place_charge<R: Rng>(&mut self, rng: &mut R) -> CellIndex {
        let shape = self.shape();
        let flat = rng.random_range(0..shape.cell_count());
        self.values.as_mut_slice()[flat] += INJECTED_CHARGE;
        CellIndex::new(flat / shape.cols(), flat % shape.cols())
    }

    /// The ordered neighbour-pair list for this grid's shape.
    pub fn neighbour_pairs(&self) -> &Arc<NeighbourPairs> {
        self.pairs
            .get_or_init(|| cache::shared_pairs(self.values.shape()))
    }

    /// Whether both grids hold the very same neighbour-pair allocation.
    ///
    /// Resolves both handles if needed.
    pub fn shares_topology_with(&self, other: &Grid) -> bool {
        Arc::ptr_eq(self.neighbour_pairs(), other.neighbour_pairs())
    }

    /// Boundary classification of `cell`, or `None` if out of bounds.
    pub fn boundary_class(&self, cell: CellIndex) -> Option<BoundaryClass> {
        BoundaryClass::of(cell, self.shape())
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, idx: (usize, usize)) -> &f64 {
        &self.values[idx]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut f64 {
        &mut self.values[idx]
    }
}

impl Index<CellIndex> for Grid {
    type Output = f64;

    fn index(&self, cell: CellIndex) -> &f64 {
        &self.values[cell]
    }
}

impl IndexMut<CellIndex> for Grid {
    fn index_mut(&mut self, cell: CellIndex) -> &mut f64 {
        &mut self.values[cell]
    }
}
