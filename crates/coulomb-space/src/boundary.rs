//! Classification of cells relative to the open grid boundary.

use coulomb_core::{CellIndex, Shape};

/// Where a cell sits with respect to the grid's outer boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryClass {
    /// Not on any edge.
    Interior,
    /// On exactly one edge (first/last row or first/last column).
    Edge,
    /// On a row edge and a column edge at once.
    Corner,
}

impl BoundaryClass {
    /// Classify `cell` within `shape`. Out-of-bounds cells yield `None`.
    ///
    /// Degenerate grids follow the same rule: in a single-row grid every
    /// cell touches a row edge, so the end cells are corners and the rest
    /// are edges.
    pub fn of(cell: CellIndex, shape: Shape) -> Option<Self> {
        if !shape.contains(cell) {
            return None;
        }
        let on_row_edge = cell.row == 0 || cell.row == shape.rows() - 1;
        let on_col_edge = cell.col == 0 || cell.col == shape.cols() - 1;
        Some(match (on_row_edge, on_col_edge) {
            (true, true) => Self::Corner,
            (true, false) | (false, true) => Self::Edge,
            (false, false) => Self::Interior,
        })
    }

    /// `true` for edge and corner cells, which leak charge out of the grid.
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Interior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_5x5() {
        let s = Shape::new(5, 5).unwrap();
        assert_eq!(BoundaryClass::of(CellIndex::new(0, 0), s), Some(BoundaryClass::Corner));
        assert_eq!(BoundaryClass::of(CellIndex::new(4, 4), s), Some(BoundaryClass::Corner));
        assert_eq!(BoundaryClass::of(CellIndex::new(0, 2), s), Some(BoundaryClass::Edge));
        assert_eq!(BoundaryClass::of(CellIndex::new(3, 0), s), Some(BoundaryClass::Edge));
        assert_eq!(BoundaryClass::of(CellIndex::new(2, 2), s), Some(BoundaryClass::Interior));
        assert_eq!(BoundaryClass::of(CellIndex::new(5, 0), s), None);
    }

    #[test]
    fn interior_count_matches_inner_rectangle() {
        let s = Shape::new(6, 4).unwrap();
        let interior = s
            .cells()
            .filter(|&c| BoundaryClass::of(c, s) == Some(BoundaryClass::Interior))
            .count();
        assert_eq!(interior, 4 * 2);
    }

    #[test]
    fn single_row_has_no_interior() {
        let s = Shape::new(1, 4).unwrap();
        assert!(s.cells().all(|c| BoundaryClass::of(c, s).unwrap().is_open()));
    }
}
