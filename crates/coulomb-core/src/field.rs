//! The [`ScalarField`] container: one `f64` per grid cell.

use crate::error::GridError;
use crate::id::CellIndex;
use crate::shape::Shape;
use std::ops::{Index, IndexMut};

/// A dense, row-major 2D array of `f64` values with a fixed [`Shape`].
///
/// Used both for charge values (inside a `Grid`) and for the derived
/// electric field. Observers receive a `&ScalarField` regardless of which
/// of the two they subscribed to.
///
/// Indexing with `(row, col)` or [`CellIndex`] panics when out of bounds,
/// like slice indexing; use [`get`](Self::get) for a checked read.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    shape: Shape,
    data: Vec<f64>,
}

impl ScalarField {
    /// A field of the given shape with every cell set to zero.
    pub fn zeros(shape: Shape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.cell_count()],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Returns `Err(GridError::LengthMismatch)` if `data.len()` differs from
    /// `shape.cell_count()`.
    pub fn from_vec(shape: Shape, data: Vec<f64>) -> Result<Self, GridError> {
        if data.len() != shape.cell_count() {
            return Err(GridError::LengthMismatch {
                expected: shape.cell_count(),
                actual: data.len(),
                context: "ScalarField::from_vec",
            });
        }
        Ok(Self { shape, data })
    }

    /// The field's shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Checked read of a single cell.
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.shape.flat_index(cell).map(|i| self.data[i])
    }

    /// Checked write of a single cell.
    pub fn set(&mut self, cell: CellIndex, value: f64) -> Result<(), GridError> {
        let i = self
            .shape
            .flat_index(cell)
            .ok_or(GridError::IndexOutOfBounds {
                cell,
                shape: self.shape,
            })?;
        self.data[i] = value;
        Ok(())
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of all values.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// One row as a slice, or `None` if `row` is out of bounds.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.shape.rows() {
            return None;
        }
        let cols = self.shape.cols();
        Some(&self.data[row * cols..(row + 1) * cols])
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Sum over all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Replace the whole buffer in one move.
    ///
    /// The shape never changes; a buffer of the wrong length is rejected
    /// and the current contents are left untouched.
    pub fn replace(&mut self, data: Vec<f64>) -> Result<(), GridError> {
        if data.len() != self.data.len() {
            return Err(GridError::LengthMismatch {
                expected: self.data.len(),
                actual: data.len(),
                context: "ScalarField::replace",
            });
        }
        self.data = data;
        Ok(())
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.shape.rows() && col < self.shape.cols(),
            "cell ({row}, {col}) out of bounds for field {}",
            self.shape
        );
        row * self.shape.cols() + col
    }
}

impl Index<(usize, usize)> for ScalarField {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for ScalarField {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        let i = self.offset(row, col);
        &mut self.data[i]
    }
}

impl Index<CellIndex> for ScalarField {
    type Output = f64;

    fn index(&self, cell: CellIndex) -> &f64 {
        &self[(cell.row, cell.col)]
    }
}

impl IndexMut<CellIndex> for ScalarField {
    fn index_mut(&mut self, cell: CellIndex) -> &mut f64 {
        &mut self[(cell.row, cell.col)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(r: usize, c: usize) -> Shape {
        Shape::new(r, c).unwrap()
    }

    #[test]
    fn zeros_has_matching_length() {
        let f = ScalarField::zeros(shape(3, 5));
        assert_eq!(f.as_slice().len(), 15);
        assert_eq!(f.sum(), 0.0);
    }

    #[test]
    fn index_and_get_agree() {
        let mut f = ScalarField::zeros(shape(2, 3));
        f[(1, 2)] = 4.5;
        assert_eq!(f.get(CellIndex::new(1, 2)), Some(4.5));
        assert_eq!(f.as_slice()[5], 4.5);
        assert_eq!(f.get(CellIndex::new(2, 0)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds_panics() {
        let f = ScalarField::zeros(shape(2, 2));
        let _ = f[(0, 2)];
    }

    #[test]
    fn set_rejects_out_of_bounds() {
        let mut f = ScalarField::zeros(shape(2, 2));
        assert!(matches!(
            f.set(CellIndex::new(5, 0), 1.0),
            Err(GridError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn replace_checks_length() {
        let mut f = ScalarField::zeros(shape(2, 2));
        assert!(f.replace(vec![1.0; 3]).is_err());
        assert_eq!(f.sum(), 0.0, "failed replace must not modify contents");
        f.replace(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(f[(1, 0)], 3.0);
    }

    #[test]
    fn row_slices() {
        let f = ScalarField::from_vec(shape(2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(f.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(f.row(2), None);
    }
}
