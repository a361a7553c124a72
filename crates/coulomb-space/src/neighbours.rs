//! Directed Moore-neighbourhood pairs for a rectangular grid.
//!
//! Every in-bounds cell `(i, j)` is paired with each of its up to eight
//! Moore neighbours `(k, l)`. Neighbours that would fall outside the grid
//! are omitted, so corners have 3 pairs, edges 5, and interior cells 8.

use coulomb_core::{CellIndex, Shape};
use smallvec::SmallVec;
use std::f64::consts::SQRT_2;

/// The eight Moore offsets, in the fixed per-cell enumeration order:
/// S, N, E, W, SE, NW, SW, NE.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// How a neighbour touches its source cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjacency {
    /// Shares an edge (row or column offset is zero).
    Orthogonal,
    /// Shares only a corner.
    Diagonal,
}

impl Adjacency {
    /// Classify an offset `(dr, dc)` from [`MOORE_OFFSETS`].
    pub fn of_offset(dr: isize, dc: isize) -> Self {
        if dr != 0 && dc != 0 {
            Self::Diagonal
        } else {
            Self::Orthogonal
        }
    }

    /// Centre-to-centre distance in cell units: 1 or √2.
    pub fn distance(self) -> f64 {
        match self {
            Self::Orthogonal => 1.0,
            Self::Diagonal => SQRT_2,
        }
    }
}

/// One directed `source -> target` pair.
///
/// Flat row-major offsets are precomputed so solvers can index their
/// buffers without re-deriving them per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NeighbourPair {
    /// The cell whose state drives the interaction, `(i, j)`.
    pub source: CellIndex,
    /// The neighbour receiving the interaction, `(k, l)`.
    pub target: CellIndex,
    /// Row-major offset of `source`.
    pub source_flat: usize,
    /// Row-major offset of `target`.
    pub target_flat: usize,
    /// Orthogonal or diagonal contact.
    pub adjacency: Adjacency,
}

impl NeighbourPair {
    /// Distance between source and target (1 or √2).
    #[inline]
    pub fn distance(&self) -> f64 {
        self.adjacency.distance()
    }
}

/// The complete, ordered neighbour-pair list for one [`Shape`].
///
/// Pairs are grouped by source cell in row-major order, and within a cell
/// follow [`MOORE_OFFSETS`]. The list is immutable once built; grids share
/// it through an `Arc` (see [`crate::cache`]).
#[derive(Debug, PartialEq, Eq)]
pub struct NeighbourPairs {
    shape: Shape,
    pairs: Vec<NeighbourPair>,
    /// `starts[n]..starts[n + 1]` is the slice of pairs whose source has
    /// flat offset `n`.
    starts: Vec<usize>,
}

impl NeighbourPairs {
    /// Enumerate every in-bounds directed pair for `shape`.
    pub fn build(shape: Shape) -> Self {
        let n = shape.cell_count();
        let mut pairs = Vec::with_capacity(n * MOORE_OFFSETS.len());
        let mut starts = Vec::with_capacity(n + 1);

        for source in shape.cells() {
            starts.push(pairs.len());
            let source_flat = source.row * shape.cols() + source.col;
            for (dr, dc) in MOORE_OFFSETS {
                let row = offset_axis(source.row, dr, shape.rows());
                let col = offset_axis(source.col, dc, shape.cols());
                if let (Some(row), Some(col)) = (row, col) {
                    pairs.push(NeighbourPair {
                        source,
                        target: CellIndex::new(row, col),
                        source_flat,
                        target_flat: row * shape.cols() + col,
                        adjacency: Adjacency::of_offset(dr, dc),
                    });
                }
            }
        }
        starts.push(pairs.len());

        Self {
            shape,
            pairs,
            starts,
        }
    }

    /// Shape this list was built for.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// All pairs in canonical order.
    pub fn as_slice(&self) -> &[NeighbourPair] {
        &self.pairs
    }

    /// Iterate over all pairs in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, NeighbourPair> {
        self.pairs.iter()
    }

    /// Number of directed pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` only for a 1x1 grid, which has no neighbours at all.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The pairs whose source is `cell` (empty if out of bounds).
    pub fn pairs_from(&self, cell: CellIndex) -> &[NeighbourPair] {
        match self.shape.flat_index(cell) {
            Some(n) => &self.pairs[self.starts[n]..self.starts[n + 1]],
            None => &[],
        }
    }

    /// The in-bounds Moore neighbours of `cell`, in offset order.
    pub fn neighbours_of(&self, cell: CellIndex) -> SmallVec<[CellIndex; 8]> {
        self.pairs_from(cell).iter().map(|p| p.target).collect()
    }
}

impl<'a> IntoIterator for &'a NeighbourPairs {
    type Item = &'a NeighbourPair;
    type IntoIter = std::slice::Iter<'a, NeighbourPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Step `val` by `delta` along an axis of length `len`.
/// Returns `None` when the result leaves `[0, len)`.
#[inline]
fn offset_axis(val: usize, delta: isize, len: usize) -> Option<usize> {
    val.checked_add_signed(delta).filter(|&v| v < len)
}
