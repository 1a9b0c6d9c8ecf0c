//! The toroidal linked structure behind Algorithm X.
//!
//! Node layout in the arena:
//!
//! ```text
//! index 0              root
//! index 1..=columns    column headers, in column order
//! index columns+1..    cells, row by row, left to right
//! ```
//!
//! Every node sits in two circular doubly-linked lists: a horizontal one
//! (left/right) and a vertical one (up/down). The root and the headers form
//! the horizontal ring of active columns; each header anchors the vertical
//! ring of its column; the cells of one matrix row form a horizontal ring.

use std::fmt;

use bitvec::prelude::*;
use log::debug;

use super::node::{Cell, ColumnHeader, ColumnId, Node, RowId};
use crate::error::{InvalidMatrixError, Result};

/// Arena index of the root sentinel.
pub(crate) const ROOT: usize = 0;

/// A Dancing Links structure built from a 0/1 matrix.
///
/// The structure is built once and never resized: `cover` and `uncover` only
/// splice existing nodes out of and back into their rings.
///
/// # Example
/// ```
/// use dlx_stepper::dancing_links::DancingLinks;
///
/// let matrix = vec![
///     vec![true, false, true],
///     vec![false, true, false],
///     vec![true, true, false],
/// ];
/// let mut links = DancingLinks::new(&matrix).unwrap();
/// assert_eq!(links.column_size(0), 2);
///
/// let before = links.clone();
/// links.cover(0);
/// assert_eq!(links.active_columns(), vec![1, 2]);
/// assert_eq!(links.column_size(1), 1);
/// links.uncover(0);
/// assert_eq!(links, before);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DancingLinks {
    nodes: Vec<Node>,
    /// Indexed by column id; the header of column `c` is node `c + 1`.
    columns: Vec<ColumnHeader>,
    /// Indexed by `node - (1 + columns)`.
    cells: Vec<Cell>,
    num_rows: usize,
    /// Header indices in the order they were covered.
    covered: Vec<usize>,
}

impl DancingLinks {
    /// Builds the structure from a boolean matrix:
    /// `matrix[r][c] == true` means row `r` covers column `c`.
    ///
    /// Rows with no `true` entry produce no cells and can never be part of a
    /// solution.
    pub fn new(matrix: &[Vec<bool>]) -> Result<Self> {
        let cols = validate_shape(matrix.iter().map(Vec::len))?;
        let cell_count = matrix.iter().flatten().filter(|&&v| v).count();
        let entries = matrix.iter().map(|row| row.iter().map(|&v| v));
        Ok(Self::link(cols, cell_count, entries))
    }

    /// Builds the structure from a matrix of `0`/`1` bytes.
    ///
    /// # Example
    /// ```
    /// use dlx_stepper::dancing_links::DancingLinks;
    /// use dlx_stepper::error::InvalidMatrixError;
    ///
    /// let links = DancingLinks::from_bits(&[vec![1, 0], vec![0, 1]]).unwrap();
    /// assert_eq!(links.num_cells(), 2);
    ///
    /// let err = DancingLinks::from_bits(&[vec![1, 2]]).unwrap_err();
    /// assert_eq!(err, InvalidMatrixError::InvalidEntry { row: 0, column: 1, value: 2 });
    /// ```
    pub fn from_bits(matrix: &[Vec<u8>]) -> Result<Self> {
        let cols = validate_shape(matrix.iter().map(Vec::len))?;

        let mut cell_count = 0;
        for (r, row) in matrix.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => cell_count += 1,
                    _ => {
                        return Err(InvalidMatrixError::InvalidEntry {
                            row: r,
                            column: c,
                            value,
                        })
                    }
                }
            }
        }

        let entries = matrix.iter().map(|row| row.iter().map(|&v| v == 1));
        Ok(Self::link(cols, cell_count, entries))
    }

    /// Links a validated, rectangular matrix of `cols` columns holding
    /// `cell_count` 1-entries.
    fn link<R, E>(cols: usize, cell_count: usize, rows: R) -> Self
    where
        R: Iterator<Item = E>,
        E: Iterator<Item = bool>,
    {
        let mut links = DancingLinks {
            nodes: Vec::with_capacity(1 + cols + cell_count),
            columns: vec![ColumnHeader::default(); cols],
            cells: Vec::with_capacity(cell_count),
            num_rows: 0,
            covered: Vec::new(),
        };

        links.nodes.push(Node::singleton(ROOT, ROOT));

        // Link column headers in a left-right ring
        for c in 1..=cols {
            links.nodes.push(Node {
                left: c - 1,
                right: if c == cols { ROOT } else { c + 1 },
                up: c,
                down: c,
                column: c,
            });
        }
        links.nodes[ROOT].left = cols;
        links.nodes[ROOT].right = 1;

        for (r, row) in rows.enumerate() {
            let mut first_in_row: Option<usize> = None;
            for (c, _) in row.enumerate().filter(|&(_, v)| v) {
                links.append_cell(r, c, &mut first_in_row);
            }
            links.num_rows += 1;
        }

        debug!(
            "built dancing links: {} rows x {} columns, {} cells",
            links.num_rows,
            cols,
            links.cells.len()
        );
        links
    }

    /// Appends a cell for `(row, col)` to the bottom of its column and to the
    /// end of the row ring that starts at `first_in_row`.
    fn append_cell(&mut self, row: RowId, col: ColumnId, first_in_row: &mut Option<usize>) {
        let header = col + 1;
        let node_idx = self.nodes.len();
        let up_idx = self.nodes[header].up;

        self.nodes.push(Node {
            left: node_idx,
            right: node_idx,
            up: up_idx,
            down: header,
            column: header,
        });
        self.cells.push(Cell { row, column: col });

        self.nodes[up_idx].down = node_idx;
        self.nodes[header].up = node_idx;
        self.columns[col].size += 1;

        match *first_in_row {
            Some(first) => {
                // Insert to the left of `first`, i.e. at the end of the ring
                let last = self.nodes[first].left;
                self.nodes[node_idx].right = first;
                self.nodes[node_idx].left = last;
                self.nodes[last].right = node_idx;
                self.nodes[first].left = node_idx;
            }
            None => *first_in_row = Some(node_idx),
        }
    }

    /// Number of columns in the source matrix.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows in the source matrix, including all-zero rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of 1-entries in the source matrix.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells currently linked into column `col`.
    ///
    /// # Panics
    /// If `col` is not a column of this structure.
    pub fn column_size(&self, col: ColumnId) -> usize {
        self.columns[col].size
    }

    /// Whether column `col` is still linked into the root ring.
    ///
    /// # Panics
    /// If `col` is not a column of this structure.
    pub fn is_column_active(&self, col: ColumnId) -> bool {
        assert!(col < self.num_columns(), "column {col} out of range");
        self.is_linked(col + 1)
    }

    /// True once every column has been covered.
    pub fn is_exhausted(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Active column ids in ring order, walking right from the root.
    pub fn active_columns(&self) -> Vec<ColumnId> {
        self.active_headers().map(|h| h - 1).collect()
    }

    /// One bit per column, set while that column is active.
    pub fn active_mask(&self) -> BitVec {
        let mut mask = bitvec![0; self.num_columns()];
        for header in self.active_headers() {
            mask.set(header - 1, true);
        }
        mask
    }

    /// Every 1-entry of the source matrix with whether its owning column is
    /// active, in row-major order.
    pub fn cell_states(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        let mask = self.active_mask();
        self.cells
            .iter()
            .map(move |cell| (*cell, mask[cell.column]))
    }

    /// Column ids currently covered, oldest first.
    pub fn covered_columns(&self) -> Vec<ColumnId> {
        self.covered.iter().map(|&h| h - 1).collect()
    }

    /// Picks the active column with the fewest cells, leftmost on ties.
    ///
    /// Returns `None` once every column is covered.
    pub fn select_column(&self) -> Option<ColumnId> {
        if self.is_exhausted() {
            return None;
        }
        Some(self.select_header() - 1)
    }

    /// Removes `col` and every row that intersects it from the active
    /// structure.
    ///
    /// # Panics
    /// If `col` is out of range or already covered.
    pub fn cover(&mut self, col: ColumnId) {
        assert!(col < self.num_columns(), "column {col} out of range");
        self.cover_header(col + 1);
    }

    /// Restores `col`, undoing the matching [`cover`](Self::cover).
    ///
    /// # Panics
    /// If `col` is not the most recently covered column that is still
    /// covered.
    pub fn uncover(&mut self, col: ColumnId) {
        assert!(col < self.num_columns(), "column {col} out of range");
        self.uncover_header(col + 1);
    }

    /// Uncovers every covered column, newest first, restoring the structure
    /// to its post-construction state.
    pub fn unwind(&mut self) {
        if !self.covered.is_empty() {
            debug!("unwinding {} covered columns", self.covered.len());
        }
        while let Some(&header) = self.covered.last() {
            self.uncover_header(header);
        }
    }

    fn active_headers(&self) -> impl Iterator<Item = usize> + '_ {
        let mut header = self.nodes[ROOT].right;
        std::iter::from_fn(move || {
            if header == ROOT {
                return None;
            }
            let current = header;
            header = self.nodes[header].right;
            Some(current)
        })
    }

    fn is_linked(&self, header: usize) -> bool {
        self.nodes[self.nodes[header].left].right == header
    }

    pub(crate) fn select_header(&self) -> usize {
        let mut c = self.nodes[ROOT].right;
        let mut best = c;
        let mut best_size = usize::MAX;
        while c != ROOT {
            let size = self.columns[c - 1].size;
            if size < best_size {
                best = c;
                best_size = size;
            }
            c = self.nodes[c].right;
        }
        best
    }

    pub(crate) fn cover_header(&mut self, col: usize) {
        assert!(self.is_linked(col), "column {} is already covered", col - 1);

        // Remove column header from the root ring
        let left_col = self.nodes[col].left;
        let right_col = self.nodes[col].right;
        self.nodes[left_col].right = right_col;
        self.nodes[right_col].left = left_col;

        let mut row_node = self.nodes[col].down;
        while row_node != col {
            let mut node = self.nodes[row_node].right;
            while node != row_node {
                let up = self.nodes[node].up;
                let down = self.nodes[node].down;
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.columns[self.nodes[node].column - 1].size -= 1;
                node = self.nodes[node].right;
            }
            row_node = self.nodes[row_node].down;
        }

        self.covered.push(col);
    }

    pub(crate) fn uncover_header(&mut self, col: usize) {
        let expected = self.covered.last().map(|&h| h - 1);
        assert_eq!(
            expected,
            Some(col - 1),
            "uncover out of order: column {} is not the last covered",
            col - 1
        );
        self.covered.pop();

        let mut row_node = self.nodes[col].up;
        while row_node != col {
            let mut node = self.nodes[row_node].left;
            while node != row_node {
                let up = self.nodes[node].up;
                let down = self.nodes[node].down;
                self.nodes[up].down = node;
                self.nodes[down].up = node;
                self.columns[self.nodes[node].column - 1].size += 1;
                node = self.nodes[node].left;
            }
            row_node = self.nodes[row_node].up;
        }

        let left_col = self.nodes[col].left;
        let right_col = self.nodes[col].right;
        self.nodes[left_col].right = col;
        self.nodes[right_col].left = col;
    }

    pub(crate) fn left(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    pub(crate) fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// Header index of the column `node` belongs to.
    pub(crate) fn header_of(&self, node: usize) -> usize {
        self.nodes[node].column
    }

    /// Source row of a cell node.
    pub(crate) fn row_of(&self, node: usize) -> RowId {
        self.cells[node - (1 + self.num_columns())].row
    }
}

impl fmt::Display for DancingLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for header in self.active_headers() {
            writeln!(
                f,
                "Column {}: {} entries",
                header - 1,
                self.columns[header - 1].size
            )?;
        }
        Ok(())
    }
}

/// Checks that a matrix with the given row lengths is non-empty and
/// rectangular, returning its column count.
fn validate_shape(mut lengths: impl Iterator<Item = usize>) -> Result<usize> {
    let expected = lengths.next().ok_or(InvalidMatrixError::EmptyMatrix)?;
    if expected == 0 {
        return Err(InvalidMatrixError::NoColumns);
    }
    for (i, found) in lengths.enumerate() {
        if found != expected {
            return Err(InvalidMatrixError::RaggedRow {
                row: i + 1,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}
