//! Error types shared across the Coulomb workspace.

use crate::id::CellIndex;
use crate::shape::Shape;
use std::error::Error;
use std::fmt;

/// Errors from grid construction, indexing, and buffer publication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid dimension was zero (or negative, when converted from a
    /// signed size).
    InvalidShape {
        /// Requested row count.
        rows: i64,
        /// Requested column count.
        cols: i64,
    },
    /// `rows * cols` does not fit in `usize`.
    CellCountOverflow {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A cell index lies outside the grid.
    IndexOutOfBounds {
        /// The offending cell.
        cell: CellIndex,
        /// Shape of the grid that rejected it.
        shape: Shape,
    },
    /// Two arrays that must share a shape do not.
    ShapeMismatch {
        /// Shape of the array being operated on.
        expected: Shape,
        /// Shape that was supplied alongside it.
        actual: Shape,
    },
    /// A flat buffer has the wrong number of elements for its shape.
    LengthMismatch {
        /// Cell count required by the shape.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
        /// Which operation rejected the buffer.
        context: &'static str,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { rows, cols } => {
                write!(f, "invalid grid shape {rows}x{cols}: dimensions must be positive")
            }
            Self::CellCountOverflow { rows, cols } => {
                write!(f, "grid shape {rows}x{cols} overflows the addressable cell count")
            }
            Self::IndexOutOfBounds { cell, shape } => {
                write!(f, "cell {cell} out of bounds for grid {shape}")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, got {actual}")
            }
            Self::LengthMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "length mismatch in {context}: expected {expected} cells, got {actual}"
                )
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = GridError::InvalidShape { rows: 0, cols: 3 };
        assert_eq!(
            e.to_string(),
            "invalid grid shape 0x3: dimensions must be positive"
        );

        let shape = Shape::new(2, 2).unwrap();
        let e = GridError::IndexOutOfBounds {
            cell: CellIndex::new(2, 0),
            shape,
        };
        assert_eq!(e.to_string(), "cell (2, 0) out of bounds for grid 2x2");

        let e = GridError::ShapeMismatch {
            expected: Shape::new(2, 3).unwrap(),
            actual: Shape::new(3, 2).unwrap(),
        };
        assert_eq!(e.to_string(), "shape mismatch: expected 2x3, got 3x2");

        let e = GridError::LengthMismatch {
            expected: 4,
            actual: 9,
            context: "replace",
        };
        assert!(e.to_string().contains("expected 4 cells, got 9"));
    }
}
