use std::fmt;

use super::node::{ColumnId, RowId};

/// One observable transition of the search.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepEvent {
    /// A column was chosen to branch on.
    ColumnPicked(ColumnId),
    /// A row was pushed onto the partial solution.
    RowPicked(RowId),
    /// A column was covered.
    ColumnCovered(ColumnId),
    /// A column was uncovered.
    ColumnUncovered(ColumnId),
    /// Every column is covered; carries the rows in the order they were picked.
    SolutionFound(Vec<RowId>),
}

impl StepEvent {
    /// True for [`StepEvent::SolutionFound`].
    pub fn is_solution(&self) -> bool {
        matches!(self, StepEvent::SolutionFound(_))
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::ColumnPicked(c) => write!(f, "Pick Column: {c}"),
            StepEvent::RowPicked(r) => write!(f, "Pick Row: {r}"),
            StepEvent::ColumnCovered(c) => write!(f, "Cover Column: {c}"),
            StepEvent::ColumnUncovered(c) => write!(f, "Uncover Column: {c}"),
            StepEvent::SolutionFound(rows) => write!(f, "Solution: {rows:?}"),
        }
    }
}
