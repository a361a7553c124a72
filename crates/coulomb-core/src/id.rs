//! Strongly-typed cell and step identifiers.

use std::fmt;

/// Position of a single cell as `(row, col)`.
///
/// Row-major: `row` selects the outer axis, `col` the inner one. A
/// `CellIndex` carries no shape; callers validate it against a
/// [`Shape`](crate::Shape) before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Row (outer axis).
    pub row: usize,
    /// Column (inner axis).
    pub col: usize,
}

impl CellIndex {
    /// Create a cell index from its row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Index of a simulation step as reported to step hooks.
///
/// A multi-step run counts from zero on every call; single-stepping
/// reports the simulator's lifetime step count instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepIndex(pub u64);

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for StepIndex {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
