//! Validated 2D grid dimensions.

use crate::error::GridError;
use crate::id::CellIndex;
use std::fmt;

/// Dimensions of a rectangular grid: `rows x cols`, both at least 1.
///
/// A `Shape` can only be obtained through [`Shape::new`] (or
/// [`Shape::from_signed`]), so every `Shape` in circulation describes a
/// non-empty grid whose cell count fits in `usize`. Shapes are `Copy` and
/// `Hash`, which lets topology caches key on them directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shape {
    rows: usize,
    cols: usize,
}

impl Shape {
    /// Validate and construct a shape.
    ///
    /// Returns `Err(GridError::InvalidShape)` if either dimension is zero,
    /// or `Err(GridError::CellCountOverflow)` if `rows * cols` overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidShape {
                rows: i64::try_from(rows).unwrap_or(i64::MAX),
                cols: i64::try_from(cols).unwrap_or(i64::MAX),
            });
        }
        if rows.checked_mul(cols).is_none() {
            return Err(GridError::CellCountOverflow { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Construct from signed dimensions, rejecting anything `<= 0`.
    pub fn from_signed(rows: i64, cols: i64) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidShape { rows, cols });
        }
        let r = usize::try_from(rows).map_err(|_| GridError::InvalidShape { rows, cols })?;
        let c = usize::try_from(cols).map_err(|_| GridError::InvalidShape { rows, cols })?;
        Self::new(r, c)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether `cell` lies inside this shape.
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Row-major flat offset of `cell`, or `None` if out of bounds.
    pub fn flat_index(&self, cell: CellIndex) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    pub fn cell_at(&self, flat: usize) -> Option<CellIndex> {
        (flat < self.cell_count()).then(|| CellIndex::new(flat / self.cols, flat % self.cols))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        let cols = self.cols;
        (0..self.cell_count()).map(move |i| CellIndex::new(i / cols, i % cols))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
