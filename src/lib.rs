//! Exact cover solving with Knuth's Dancing Links, one step at a time.
//!
//! - [`dancing_links`] builds the linked structure and runs Algorithm X as a
//!   steppable search that reports every pick, cover, uncover and solution.
//! - [`backtracking`] enumerates exact covers by plain subset backtracking,
//!   for cross-checking.

pub mod backtracking;
pub mod dancing_links;
pub mod error;

pub use dancing_links::{
    solve_all, DancingLinks, ExactCoverSearch, SearchConfig, SearchStats, StepEvent, StepMode,
};
pub use error::{InvalidMatrixError, Result};
