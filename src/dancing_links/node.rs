//! Arena entries shared by the root, the column headers and the cells.

/// Identifier of a matrix column (0-based, in input order).
pub type ColumnId = usize;

/// Identifier of a matrix row (0-based, in input order).
pub type RowId = usize;

/// Each dancing-links node links up/down/left/right in a circular list.
///
/// Links are indices into the owning arena. The root and the column headers
/// use the same shape as cells so ring walks never need a boundary check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) up: usize,
    pub(crate) down: usize,
    /// Arena index of the column header this node belongs to.
    pub(crate) column: usize,
}

impl Node {
    /// A node whose four links all point back at itself.
    pub(crate) fn singleton(index: usize, column: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
        }
    }
}

/// Each column header tracks how many cells are still linked below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ColumnHeader {
    pub(crate) size: usize,
}

/// A 1-entry of the source matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Row of the source matrix the entry came from.
    pub row: RowId,
    /// Column of the source matrix the entry belongs to.
    pub column: ColumnId,
}

impl Cell {
    /// Grid coordinates as `(row, column)`, for drawing.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.column)
    }
}
