//! A steppable Dancing Links (Algorithm X) exact cover solver.
//!
//! This solves the "Exact Cover" problem by selecting rows of a 0/1 matrix
//! so that every column is covered exactly once. [`DancingLinks`] holds the
//! matrix as a toroidal linked structure; [`ExactCoverSearch`] walks it with
//! Knuth's Algorithm X and reports every primitive it performs as a
//! [`StepEvent`], so a driver can pause between any two of them.
//!
//! # Example
//! ```
//! use dlx_stepper::dancing_links::solve_all;
//!
//! // Knuth's example from "Dancing Links"
//! let matrix = vec![
//!     vec![0, 0, 1, 0, 1, 1, 0],
//!     vec![1, 0, 0, 1, 0, 0, 1],
//!     vec![0, 1, 1, 0, 0, 1, 0],
//!     vec![1, 0, 0, 1, 0, 0, 0],
//!     vec![0, 1, 0, 0, 0, 0, 1],
//!     vec![0, 0, 0, 1, 1, 0, 1],
//! ];
//! let solutions = solve_all(&matrix).unwrap();
//! assert_eq!(solutions, vec![vec![3, 0, 4]]);
//! ```

pub mod event;
pub mod node;
pub mod search;
pub mod structure;

#[cfg(test)]
mod tests;

pub use event::StepEvent;
pub use node::{Cell, ColumnId, RowId};
pub use search::ExactCoverSearch;
pub use structure::DancingLinks;

use crate::error::Result;

/// How far a single [`ExactCoverSearch::advance`] call goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepMode {
    /// Stop after every pick, cover and uncover.
    Step,
    /// Stop only when a solution is found.
    #[default]
    Run,
}

/// Configuration options for the exact cover search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Whether `advance` stops at every primitive or only at solutions
    pub mode: StepMode,
    /// Stop reporting after this many solutions; `None` enumerates all.
    pub max_solutions: Option<usize>,
}

/// Counters of the primitives a search has performed so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Columns chosen to branch on
    pub column_picks: usize,
    /// Rows pushed onto the partial solution
    pub row_picks: usize,
    /// Columns covered
    pub covers: usize,
    /// Columns uncovered
    pub uncovers: usize,
    /// Solutions reported
    pub solutions: usize,
}

impl SearchStats {
    /// Picks, covers and uncovers performed; solution reports excluded.
    pub fn operations(&self) -> usize {
        self.column_picks + self.row_picks + self.covers + self.uncovers
    }
}

/// Finds every exact cover of a `0`/`1` matrix.
///
/// Each solution lists row indices in the order the search picked them.
pub fn solve_all(matrix: &[Vec<u8>]) -> Result<Vec<Vec<RowId>>> {
    let links = DancingLinks::from_bits(matrix)?;
    Ok(ExactCoverSearch::new(links, SearchConfig::default())
        .solutions()
        .collect())
}
